//! Simulation tuning
//!
//! Built once at startup and handed to the simulation by reference, so tests
//! can run the model with alternate parameter sets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Category;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Orbit kinematics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Horizontal radius of the orbit
    pub radius: f32,
    /// Vertical squash factor (y radius = radius * ellipse_yx)
    pub ellipse_yx: f32,
    /// Angular speed in radians per millisecond
    pub rotation_per_ms: f32,
    /// Slack past ±π tolerated before wrapping
    pub epsilon: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: ORBIT_RADIUS,
            ellipse_yx: ORBIT_ELLIPSE_YX,
            rotation_per_ms: ORBIT_RADIANS_PER_MS,
            epsilon: ANGLE_EPSILON,
        }
    }
}

/// Output model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Parameter delay; larger values respond more slowly
    pub inertia_ms: f32,
    /// An output above this ends the game with `max_messages[i]`
    pub max_threshold: f32,
    /// An output below this ends the game with `min_messages[i]`
    pub min_threshold: f32,
    /// Input mixing matrix, one row per output
    pub mix_rows: [[f32; CATEGORY_COUNT]; CATEGORY_COUNT],
    pub max_messages: [String; CATEGORY_COUNT],
    /// War has no "min" ending, hence the empty first entry
    pub min_messages: [String; CATEGORY_COUNT],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            inertia_ms: MODEL_INERTIA_MS,
            max_threshold: MAX_THRESHOLD,
            min_threshold: MIN_THRESHOLD,
            // Love and work mitigate war; they don't interact with each other
            mix_rows: [
                [1.0, -0.25, -0.25],
                [0.0, 2.0 / 3.0, 0.0],
                [0.0, 0.0, 2.0 / 3.0],
            ],
            max_messages: [
                "self-destruction".to_string(),
                "overpopulation".to_string(),
                "pollution".to_string(),
            ],
            min_messages: [
                String::new(),
                "extinction".to_string(),
                "starvation".to_string(),
            ],
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub orbit: OrbitConfig,
    pub model: ModelConfig,
    /// Calendar milliseconds per elapsed game millisecond
    pub time_scale: f64,
    /// Key bound to each category, in category order
    pub key_bindings: [char; CATEGORY_COUNT],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitConfig::default(),
            model: ModelConfig::default(),
            time_scale: CALENDAR_TIME_SCALE,
            key_bindings: ['Q', 'W', 'E'],
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let orbit = &self.orbit;
        if !(orbit.radius.is_finite() && orbit.radius > 0.0) {
            return invalid(format!("orbit.radius must be positive, got {}", orbit.radius));
        }
        if !orbit.ellipse_yx.is_finite() {
            return invalid("orbit.ellipse_yx must be finite".to_string());
        }
        if !orbit.rotation_per_ms.is_finite() {
            return invalid("orbit.rotation_per_ms must be finite".to_string());
        }
        if !(0.0..std::f32::consts::PI).contains(&orbit.epsilon) {
            return invalid(format!("orbit.epsilon must be in [0, π), got {}", orbit.epsilon));
        }

        let model = &self.model;
        if !(model.inertia_ms.is_finite() && model.inertia_ms >= 0.0) {
            return invalid(format!(
                "model.inertia_ms must be non-negative, got {}",
                model.inertia_ms
            ));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&model.min_threshold) || !unit.contains(&model.max_threshold) {
            return invalid("model thresholds must lie in [0, 1]".to_string());
        }
        if model.min_threshold >= model.max_threshold {
            return invalid(format!(
                "model.min_threshold ({}) must be below max_threshold ({})",
                model.min_threshold, model.max_threshold
            ));
        }
        if model.mix_rows.iter().flatten().any(|v| !v.is_finite()) {
            return invalid("model.mix_rows must be finite".to_string());
        }

        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return invalid(format!("time_scale must be non-negative, got {}", self.time_scale));
        }

        for (i, a) in self.key_bindings.iter().enumerate() {
            for b in &self.key_bindings[i + 1..] {
                if a.eq_ignore_ascii_case(b) {
                    return invalid(format!("key '{}' is bound to more than one category", a));
                }
            }
        }

        Ok(())
    }

    /// Category bound to a key press (case-insensitive)
    pub fn category_for_key(&self, key: char) -> Option<Category> {
        self.key_bindings
            .iter()
            .position(|k| k.eq_ignore_ascii_case(&key))
            .map(|i| Category::ALL[i])
    }
}
