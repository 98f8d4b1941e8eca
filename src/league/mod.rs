//! League registry, entity histories, season alignment and export views
//!
//! This is the stateful core: a `League` owns every `Entity`, routes match
//! results through the configured rating model, and manages the
//! season-segmented history machinery.

pub mod align;
pub mod entity;
pub mod export;
pub mod registry;

// Re-export commonly used types
pub use entity::Entity;
pub use export::{FullExport, SeriesExport, DEFAULT_SERIES_COLOR};
pub use registry::{normalize_season_label, League};
