//! Configuration management
//!
//! Defaults, TOML file loading, environment overrides and validation for
//! the rating tunables and the data/region layout.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DataSettings, RegionSettings, ServiceSettings};
pub use rating::RatingConfig;
