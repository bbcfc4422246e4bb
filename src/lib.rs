//! Orb Balance - three orbs orbiting a planet, one linear model
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orbs, selection buffer, output model)
//! - `config`: Immutable tuning values injected into the simulation
//! - `calendar`: In-game calendar derived from elapsed time

pub mod calendar;
pub mod config;
pub mod sim;

pub use calendar::SimCalendar;
pub use config::{ConfigError, ModelConfig, OrbitConfig, SimConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Number of categories, orbs on the orbit and model dimensions
    pub const CATEGORY_COUNT: usize = 3;
    /// Capacity of the selection buffer
    pub const SELECTION_CAPACITY: usize = 3;

    /// Slack allowed past ±π before an angle is wrapped
    pub const ANGLE_EPSILON: f32 = 0.001;

    /// Orbit defaults
    pub const ORBIT_RADIUS: f32 = 300.0;
    pub const ORBIT_ELLIPSE_YX: f32 = 0.15;
    pub const ORBIT_RADIANS_PER_MS: f32 = 0.0001;

    /// Depth cue: scale = DEPTH_SCALE_BASE + DEPTH_SCALE_SWING * sin(angle).
    /// Cosmetic design constants, unrelated to the orbit radius.
    pub const DEPTH_SCALE_BASE: f32 = 0.67;
    pub const DEPTH_SCALE_SWING: f32 = 0.33;

    /// Model defaults
    pub const MODEL_INERTIA_MS: f32 = 8000.0;
    pub const MAX_THRESHOLD: f32 = 0.97;
    pub const MIN_THRESHOLD: f32 = 0.03;

    /// One calendar month per real second
    pub const CALENDAR_TIME_SCALE: f64 = 365.25 / 12.0 * 86400.0;
}

/// Wrap an angle into (-π - ε, π + ε] by repeatedly stepping 2π toward zero.
///
/// Unlike a modulo this never flips the sign of an angle that is already in
/// range, so a rotation just past +π stays positive until it exceeds the slack.
#[inline]
pub fn normalize_rotation(mut angle: f32, epsilon: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    // Far out of range, stepping by 2π stops changing the value; fmod is
    // exact and keeps the sign
    if angle.abs() > 4.0 * TAU {
        angle %= TAU;
    }
    while angle.abs() > PI + epsilon {
        if angle > 0.0 {
            angle -= TAU;
        } else {
            angle += TAU;
        }
    }
    angle
}

/// Position on an elliptical orbit centred at the origin.
///
/// `squash` < 1 flattens the orbit vertically.
#[inline]
pub fn position_on_orbit(angle: f32, radius: f32, squash: f32) -> Vec2 {
    Vec2::new(radius * angle.cos(), squash * radius * angle.sin())
}

/// Sprite scale for an orb at the given angle
#[inline]
pub fn scale_from_angle(angle: f32) -> f32 {
    consts::DEPTH_SCALE_BASE + consts::DEPTH_SCALE_SWING * angle.sin()
}
