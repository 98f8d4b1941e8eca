//! External data collaborators
//!
//! Everything between the wiki/filesystem and the rating core: the
//! cargoquery client, the results cache, roster files and season boundary
//! derivation. The core never touches these directly; `main` wires them up.

pub mod cache;
pub mod leaguepedia;
pub mod roster;
pub mod seasons;

// Re-export commonly used types
pub use cache::CachedSource;
pub use leaguepedia::{LeaguepediaClient, MatchSource};
pub use roster::load_team_file;
pub use seasons::derive_boundaries;
