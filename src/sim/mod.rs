//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Every update takes the elapsed time explicitly
//! - Tuning comes from an injected `SimConfig`, never from globals
//! - Stable iteration order (by category index)

pub mod category;
pub mod model;
pub mod orb;
pub mod selection;
pub mod state;

pub use category::Category;
pub use model::{GameOver, Threshold, check_game_over, clamp01, lag, mat_mul, mix, step};
pub use orb::{EvictedOrb, Orb};
pub use selection::OrbSelection;
pub use state::{GameEvent, HudSnapshot, SimPhase, SimulationState};
