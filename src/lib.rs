//! League Elo - season-aware Elo ratings for pro league match histories
//!
//! This crate tracks skill ratings for competitive teams across seasons:
//! an Elo rating engine with a margin-of-victory term, per-entity history
//! segments aligned at season boundaries, regression-to-mean resets, and
//! export views for tables and plots. Match data comes from a wiki
//! cargoquery API with a disk cache in front of it.

pub mod config;
pub mod error;
pub mod league;
pub mod plot;
pub mod rating;
pub mod source;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use league::{FullExport, League};
pub use rating::{EloModel, NaiveModel, RatingModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
