//! Forecast accuracy tracking
//!
//! One squared forecast miss is accumulated per decisive match; the mean is
//! the Brier score of the model over the processed history. 0 is a perfect
//! forecaster, 0.25 is always-50/50.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accumulates Brier-score components across a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrierTracker {
    samples: Vec<f64>,
}

/// Aggregate forecast-accuracy statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub samples: usize,
    /// Mean squared forecast miss; `None` until a match has been processed
    pub brier_score: Option<f64>,
}

impl BrierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the forecast miss of one decided match
    pub fn record(&mut self, forecast_miss: f64) {
        self.samples.push(forecast_miss * forecast_miss);
    }

    pub fn report(&self) -> AccuracyReport {
        let brier_score = if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        };
        AccuracyReport {
            samples: self.samples.len(),
            brier_score,
        }
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.brier_score {
            Some(score) => write!(f, "Brier Score: {score:.4} ({} matches)", self.samples),
            None => write!(f, "Brier Score: n/a (no matches processed)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_has_no_score() {
        let report = BrierTracker::new().report();
        assert_eq!(report.samples, 0);
        assert_eq!(report.brier_score, None);
    }

    #[test]
    fn test_mean_of_squared_misses() {
        let mut tracker = BrierTracker::new();
        tracker.record(0.5);
        tracker.record(0.5);
        let report = tracker.report();
        assert_eq!(report.samples, 2);
        assert!((report.brier_score.unwrap() - 0.25).abs() < 1e-12);

        tracker.record(0.0);
        let report = tracker.report();
        assert!((report.brier_score.unwrap() - (0.25 + 0.25) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_formats() {
        let mut tracker = BrierTracker::new();
        assert!(tracker.report().to_string().contains("n/a"));
        tracker.record(0.5);
        assert!(tracker.report().to_string().starts_with("Brier Score: 0.2500"));
    }
}
