//! Team roster files
//!
//! One CSV per region, no header, one team per row:
//! `id, abbrev, name[, color]`. A row whose id already appeared registers
//! extra aliases for the existing entity, which is how renamed organizations
//! keep a single rating history.

use crate::error::{LeagueError, Result};
use crate::types::TeamInfo;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Load every team row from a roster file, in file order
pub fn load_team_file(path: &Path) -> Result<Vec<TeamInfo>> {
    let invalid = |reason: String| LeagueError::InvalidTeamFile {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| invalid(e.to_string()))?;

    let mut teams = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| invalid(e.to_string()))?;
        if record.len() < 3 {
            return Err(invalid(format!(
                "row {} has {} fields, expected id, abbrev, name[, color]",
                line + 1,
                record.len()
            ))
            .into());
        }
        teams.push(TeamInfo {
            id: record[0].to_string(),
            abbrev: record[1].to_string(),
            name: record[2].to_string(),
            color: record.get(3).filter(|c| !c.is_empty()).map(str::to_string),
        });
    }
    Ok(teams)
}
