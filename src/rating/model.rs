//! Rating model trait and implementations
//!
//! The interface every rating strategy satisfies, plus the two concrete
//! strategies: the margin-of-victory Elo rule and a naive fixed-shift
//! baseline used to sanity-check the Elo model's forecast accuracy.

use crate::config::RatingConfig;

/// Result of processing one decided match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    /// Winner's rating after the update
    pub winner_rating: f64,
    /// Loser's rating after the update
    pub loser_rating: f64,
    /// `1 - forecast(winner, loser)`: the model's surprise at the result,
    /// in [0, 1). The caller records its square as a Brier sample.
    pub forecast_miss: f64,
}

/// Trait for pairwise rating strategies
///
/// Implementations are pure: no validation and no side effects. The league
/// guarantees `score_w > score_l` and `score_w + score_l > 0` before calling
/// `process_outcome`.
pub trait RatingModel: Send + Sync {
    /// Probability that the first side beats the second, in (0, 1).
    /// Symmetric: `forecast(a, b) == 1 - forecast(b, a)`.
    fn forecast(&self, rating_a: f64, rating_b: f64) -> f64;

    /// Updated ratings for a decided match, winner first
    fn process_outcome(&self, winner: f64, loser: f64, score_w: u32, score_l: u32) -> MatchOutcome;

    /// Short name for logs and report headers
    fn name(&self) -> &'static str;
}

/// Elo with a margin-of-victory multiplier.
///
/// `delta = K * (1 - forecast(winner, loser)) * ((w - l) * w / (w + l))^0.7`
/// applied zero-sum: winner gains `delta`, loser drops `delta`.
#[derive(Debug, Clone, Default)]
pub struct EloModel {
    config: RatingConfig,
}

impl EloModel {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    /// Scales the adjustment with how lopsided the series score was
    fn margin_multiplier(&self, score_w: u32, score_l: u32) -> f64 {
        let (w, l) = (f64::from(score_w), f64::from(score_l));
        ((w - l) * w / (w + l)).powf(self.config.margin_exponent)
    }
}

impl RatingModel for EloModel {
    fn forecast(&self, rating_a: f64, rating_b: f64) -> f64 {
        let diff = rating_a - rating_b;
        1.0 / (1.0 + 10f64.powf(-diff / self.config.scale))
    }

    fn process_outcome(&self, winner: f64, loser: f64, score_w: u32, score_l: u32) -> MatchOutcome {
        let forecast_miss = 1.0 - self.forecast(winner, loser);
        let delta = self.config.k_factor * forecast_miss * self.margin_multiplier(score_w, score_l);
        MatchOutcome {
            winner_rating: winner + delta,
            loser_rating: loser - delta,
            forecast_miss,
        }
    }

    fn name(&self) -> &'static str {
        "elo"
    }
}

/// Naive baseline: always forecasts a coin flip and always moves the winner
/// up by half the K-factor, zero-sum.
///
/// Its Brier score is exactly 0.25, the always-50/50 reference point, which
/// makes it a direct yardstick for the Elo model's accuracy report.
#[derive(Debug, Clone, Default)]
pub struct NaiveModel {
    config: RatingConfig,
}

impl NaiveModel {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }
}

impl RatingModel for NaiveModel {
    fn forecast(&self, _rating_a: f64, _rating_b: f64) -> f64 {
        0.5
    }

    fn process_outcome(
        &self,
        winner: f64,
        loser: f64,
        _score_w: u32,
        _score_l: u32,
    ) -> MatchOutcome {
        let delta = self.config.k_factor / 2.0;
        MatchOutcome {
            winner_rating: winner + delta,
            loser_rating: loser - delta,
            forecast_miss: 0.5,
        }
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
