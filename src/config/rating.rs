//! Rating model configuration

use serde::{Deserialize, Serialize};

/// Tunables for the Elo update rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating every entity starts a history with
    pub initial_rating: f64,
    /// K-factor: maximum weight of a single match before the margin term
    pub k_factor: f64,
    /// Logistic scale; 400 gives the classic "10x odds per 400 points" curve
    pub scale: f64,
    /// Exponent applied to the margin-of-victory term
    pub margin_exponent: f64,
    /// Weight kept by the old rating during a hard season reset; the
    /// remainder comes from the regional mean
    pub regression_weight: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            k_factor: 20.0,
            scale: 400.0,
            margin_exponent: 0.7,
            regression_weight: 0.75,
        }
    }
}
