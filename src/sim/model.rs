//! Linear output model
//!
//! Pure functions: selection counts are mixed by a fixed 3x3 matrix, each
//! output follows its target through a first-order lag, and outputs are
//! clamped to [0, 1]. Any output leaving the band between the two thresholds
//! ends the game.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::config::ModelConfig;
use crate::consts::{CATEGORY_COUNT, SELECTION_CAPACITY};

/// Which saturation bound was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    Max,
    Min,
}

/// Why the game ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOver {
    pub category: Category,
    pub threshold: Threshold,
    pub message: String,
}

/// Build the mixing matrix from rows (row i dotted with the input gives output i)
pub fn mix_matrix(rows: &[[f32; CATEGORY_COUNT]; CATEGORY_COUNT]) -> Mat3 {
    // glam is column-major
    Mat3::from_cols_array_2d(rows).transpose()
}

/// Matrix times column vector
#[inline]
pub fn mat_mul(matrix: &Mat3, v: Vec3) -> Vec3 {
    *matrix * v
}

/// Apply the mixing matrix to an input vector
pub fn mix(model: &ModelConfig, inputs: [f32; CATEGORY_COUNT]) -> [f32; CATEGORY_COUNT] {
    mat_mul(&mix_matrix(&model.mix_rows), Vec3::from_array(inputs)).to_array()
}

/// Move `previous` toward `target` after `elapsed_ms`.
///
/// The two weights `1/(1 + e/i)` and `1/(1 + i/e)` sum to one. Zero elapsed
/// time leaves the value untouched, which also covers the `i/0` term.
pub fn lag(previous: f32, target: f32, elapsed_ms: f32, inertia_ms: f32) -> f32 {
    if elapsed_ms <= 0.0 {
        return previous;
    }
    if inertia_ms <= 0.0 {
        return target;
    }
    previous / (1.0 + elapsed_ms / inertia_ms) + target / (1.0 + inertia_ms / elapsed_ms)
}

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Initial outputs: each category's share of the selection
pub fn initial_outputs(counts: [f32; CATEGORY_COUNT]) -> [f32; CATEGORY_COUNT] {
    counts.map(|c| clamp01(c / SELECTION_CAPACITY as f32))
}

/// One model update.
///
/// Raw counts are turned into shares of the selection before mixing, so a
/// full buffer of one category drives its input to 1.
pub fn step(
    model: &ModelConfig,
    previous: [f32; CATEGORY_COUNT],
    counts: [f32; CATEGORY_COUNT],
    elapsed_ms: f32,
) -> [f32; CATEGORY_COUNT] {
    let shares = counts.map(|c| c / SELECTION_CAPACITY as f32);
    let targets = mix(model, shares);
    std::array::from_fn(|i| clamp01(lag(previous[i], targets[i], elapsed_ms, model.inertia_ms)))
}

/// Scan outputs in category order; the last crossed threshold wins.
///
/// The lower bound only trips for an output still above zero, so a category
/// sitting at exactly 0 never ends the game. Empty messages never end the
/// game either (war has no "min" ending).
pub fn check_game_over(model: &ModelConfig, outputs: [f32; CATEGORY_COUNT]) -> Option<GameOver> {
    let mut result = None;
    for category in Category::ALL {
        let i = category.index();
        let crossed = if outputs[i] > model.max_threshold {
            Some((Threshold::Max, &model.max_messages[i]))
        } else if outputs[i] > 0.0 && outputs[i] < model.min_threshold {
            Some((Threshold::Min, &model.min_messages[i]))
        } else {
            None
        };
        if let Some((threshold, message)) = crossed {
            if !message.is_empty() {
                result = Some(GameOver {
                    category,
                    threshold,
                    message: message.clone(),
                });
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    fn message(model: &ModelConfig, outputs: [f32; 3]) -> String {
        check_game_over(model, outputs)
            .map(|g| g.message)
            .unwrap_or_default()
    }

    #[test]
    fn test_mat_mul_orientation() {
        let m = mix_matrix(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let v = mat_mul(&m, Vec3::new(1.0, 0.0, 0.0));
        // First column of the row-major matrix
        assert_eq!(v, Vec3::new(1.0, 4.0, 7.0));
        let w = mat_mul(&m, Vec3::ONE);
        assert_eq!(w, Vec3::new(6.0, 15.0, 24.0));
    }

    #[test]
    fn test_mix_calibration() {
        let model = ModelConfig::default();
        assert_close(mix(&model, [3.0, 0.0, 0.0]), [3.0, 0.0, 0.0]);
        assert_close(mix(&model, [1.0, 1.0, 1.0]), [0.5, 2.0 / 3.0, 2.0 / 3.0]);
        // Love and work only ever damp themselves
        assert_close(mix(&model, [0.0, 3.0, 0.0]), [-0.75, 2.0, 0.0]);
    }

    #[test]
    fn test_lag_zero_elapsed_is_noop() {
        assert_eq!(lag(0.4, 1.0, 0.0, 8000.0), 0.4);
        assert_eq!(lag(0.4, -7.0, 0.0, 0.0), 0.4);
    }

    #[test]
    fn test_lag_weights() {
        // 1000 / 8000: weights 8/9 and 1/9
        let v = lag(0.9, 0.0, 1000.0, 8000.0);
        assert!((v - 0.8).abs() < 1e-6);
        let v = lag(0.0, 0.9, 1000.0, 8000.0);
        assert!((v - 0.1).abs() < 1e-6);
        // No inertia jumps straight to the target
        assert_eq!(lag(0.2, 0.7, 16.0, 0.0), 0.7);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.5), 0.5);
    }

    #[test]
    fn test_step_clamps() {
        let model = ModelConfig::default();
        // Pure love pushes war's target negative
        let out = step(&model, [0.01, 0.5, 0.5], [0.0, 3.0, 0.0], 100_000.0);
        assert_eq!(out[0], 0.0);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_step_zero_elapsed() {
        let model = ModelConfig::default();
        let prev = [0.3, 0.2, 0.1];
        assert_eq!(step(&model, prev, [3.0, 0.0, 0.0], 0.0), prev);
    }

    #[test]
    fn test_step_converges_from_equal_counts() {
        let model = ModelConfig::default();
        let counts = [1.0, 1.0, 1.0];
        let mut outputs = initial_outputs(counts);
        assert_close(outputs, [1.0 / 3.0; 3]);

        for _ in 0..200 {
            let next = step(&model, outputs, counts, 1000.0);
            for i in 0..3 {
                assert!(next[i] <= outputs[i] + 1e-7, "output {} rose", i);
                assert!((0.0..=1.0).contains(&next[i]));
            }
            outputs = next;
        }
        assert_close(outputs, [0.5 / 3.0, 2.0 / 9.0, 2.0 / 9.0]);
    }

    #[test]
    fn test_game_over_messages() {
        let model = ModelConfig::default();
        assert_eq!(message(&model, [0.98, 0.5, 0.5]), "self-destruction");
        assert_eq!(message(&model, [0.5, 0.5, 0.5]), "");
        assert_eq!(message(&model, [0.5, 0.5, 0.01]), "starvation");
        assert_eq!(message(&model, [0.5, 0.01, 0.5]), "extinction");
    }

    #[test]
    fn test_game_over_last_match_wins() {
        let model = ModelConfig::default();
        // Work's min overrides love's max
        let over = check_game_over(&model, [0.0, 0.98, 0.02]).unwrap();
        assert_eq!(over.message, "starvation");
        assert_eq!(over.category, Category::Work);
        assert_eq!(over.threshold, Threshold::Min);

        // Outputs at exactly zero don't trip the lower bound
        assert_eq!(message(&model, [0.98, 0.0, 0.0]), "self-destruction");
        assert_eq!(message(&model, [0.98, 0.01, 0.5]), "extinction");
    }

    #[test]
    fn test_zero_output_is_not_a_min_crossing() {
        let model = ModelConfig::default();
        assert!(check_game_over(&model, [0.5, 0.0, 0.5]).is_none());
        assert!(check_game_over(&model, [0.0, 0.0, 0.0]).is_none());
        assert_eq!(message(&model, [0.5, 0.0, 0.02]), "starvation");
    }

    #[test]
    fn test_war_has_no_min_ending() {
        let model = ModelConfig::default();
        assert!(check_game_over(&model, [0.0, 0.5, 0.5]).is_none());
        assert!(check_game_over(&model, [0.01, 0.5, 0.5]).is_none());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let model = ModelConfig::default();
        assert!(check_game_over(&model, [0.97, 0.03, 0.03]).is_none());
    }
}
