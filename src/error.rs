//! Error types for the rating engine
//!
//! Recoverable data-quality conditions (unknown team names, missing scores,
//! ties) are absorbed inside the league with a log line and never surface
//! here; these variants cover structural misuse and I/O at the edges.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating and data-loading failures
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("entity not found: {reference}")]
    EntityNotFound { reference: String },

    #[error("no entities registered; load a team file before processing results")]
    EmptyRegistry,

    #[error("rating model produced a non-finite rating for {entity}")]
    NonFiniteRating { entity: String },

    #[error("invalid team file {path}: {reason}")]
    InvalidTeamFile { path: String, reason: String },

    #[error("data source request failed: {message}")]
    SourceUnavailable { message: String },

    #[error("cache I/O failed for {path}: {message}")]
    CacheIo { path: String, message: String },

    #[error("configuration error: {message}")]
    ConfigurationError { message: String },
}
