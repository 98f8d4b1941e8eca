//! Rating strategies and forecast-accuracy tracking
//!
//! The `RatingModel` trait is the seam between the league and the math:
//! the Elo margin-of-victory rule and the naive baseline both live behind
//! it and are selected when the league is constructed.

pub mod accuracy;
pub mod model;

// Re-export commonly used types
pub use accuracy::{AccuracyReport, BrierTracker};
pub use model::{EloModel, MatchOutcome, NaiveModel, RatingModel};
