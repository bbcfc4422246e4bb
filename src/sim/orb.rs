//! Orbiting orbs
//!
//! An orb is Active while it sits in the selection buffer. Eviction consumes
//! it and hands back an [`EvictedOrb`], which has no way to advance, so an
//! orb can never be updated after its visual has been released.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::config::OrbitConfig;
use crate::{normalize_rotation, position_on_orbit, scale_from_angle};

/// An active orb on the orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub category: Category,
    /// Current angle (radians, normalized to (-π-ε, π+ε])
    rotation: f32,
}

impl Orb {
    pub fn new(id: u32, category: Category, rotation: f32, orbit: &OrbitConfig) -> Self {
        Self {
            id,
            category,
            rotation: normalize_rotation(rotation, orbit.epsilon),
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advance by a variable timestep (no fixed-step accumulator; jitter is
    /// acceptable for a cosmetic orbit)
    pub fn advance(&mut self, elapsed_ms: f32, orbit: &OrbitConfig) {
        self.rotation = normalize_rotation(
            self.rotation + orbit.rotation_per_ms * elapsed_ms,
            orbit.epsilon,
        );
    }

    /// Offset from the orbit centre
    pub fn position(&self, orbit: &OrbitConfig) -> Vec2 {
        position_on_orbit(self.rotation, orbit.radius, orbit.ellipse_yx)
    }

    /// Depth-cue sprite scale
    pub fn scale(&self) -> f32 {
        scale_from_angle(self.rotation)
    }

    /// Remove the orb from play
    pub fn evict(self) -> EvictedOrb {
        EvictedOrb {
            id: self.id,
            category: self.category,
            final_rotation: self.rotation,
        }
    }
}

/// Record of an orb that left the selection buffer; its visual should be
/// released exactly once when this is received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvictedOrb {
    pub id: u32,
    pub category: Category,
    pub final_rotation: f32,
}
