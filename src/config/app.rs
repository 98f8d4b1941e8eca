//! Main application configuration
//!
//! Defaults cover the five tracked leagues; a TOML file and a handful of
//! environment variables can override paths and logging without touching
//! the built-in region table.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub data: DataSettings,
    pub regions: Vec<RegionSettings>,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Filesystem locations for cached results, team files and outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub cache_dir: PathBuf,
    pub team_file_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// One tracked region: the roster file that seeds it and the first year of
/// results worth processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSettings {
    pub key: String,
    pub team_file: String,
    pub start_year: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            data: DataSettings::default(),
            regions: default_regions(),
            rating: RatingConfig::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "league-elo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            team_file_dir: PathBuf::from("cfg"),
            output_dir: PathBuf::from("docs"),
        }
    }
}

fn default_regions() -> Vec<RegionSettings> {
    let table = [
        ("NA", "LCS_teams.csv", 2015),
        ("EU", "LEC_teams.csv", 2015),
        ("KR", "LCK_teams.csv", 2015),
        ("CN", "LPL_teams.csv", 2015),
        ("INT", "INT_teams.csv", 2015),
    ];
    table
        .iter()
        .map(|(key, file, year)| RegionSettings {
            key: key.to_string(),
            team_file: file.to_string(),
            start_year: *year,
        })
        .collect()
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// variable overrides on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Ok(level) = env::var("LEAGUE_ELO_LOG_LEVEL") {
            config.service.log_level = level;
        }
        if let Ok(dir) = env::var("LEAGUE_ELO_CACHE_DIR") {
            config.data.cache_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("LEAGUE_ELO_OUTPUT_DIR") {
            config.data.output_dir = PathBuf::from(dir);
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Region settings for a key, case-insensitive
    pub fn region(&self, key: &str) -> Option<&RegionSettings> {
        self.regions
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(key))
    }
}

/// Validate configuration invariants before anything is built from them
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.regions.is_empty() {
        return Err(anyhow!("no regions configured"));
    }
    for region in &config.regions {
        if region.key.is_empty() || region.team_file.is_empty() {
            return Err(anyhow!("region entries need a key and a team file"));
        }
        if !(1990..=2100).contains(&region.start_year) {
            return Err(anyhow!(
                "implausible start year {} for region {}",
                region.start_year,
                region.key
            ));
        }
    }
    if config.rating.k_factor <= 0.0 || config.rating.scale <= 0.0 {
        return Err(anyhow!("k_factor and scale must be positive"));
    }
    if !(0.0..=1.0).contains(&config.rating.regression_weight) {
        return Err(anyhow!("regression_weight must be within [0, 1]"));
    }
    Ok(())
}
