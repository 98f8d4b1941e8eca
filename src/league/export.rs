//! Read-only export views of a league
//!
//! Snapshots for the renderer and for diagnostics: the sorted active
//! ratings table, and the full aligned time series per entity. Nothing here
//! mutates the league; call `align` first so segment lengths are comparable.

use crate::league::registry::League;
use serde::{Deserialize, Serialize};

/// Plot color used when a roster row doesn't set one
pub const DEFAULT_SERIES_COLOR: &str = "#808080";

/// One entity's complete exported time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesExport {
    pub abbrev: String,
    pub color: String,
    /// Aligned rating history, one inner list per season segment
    pub history: Vec<Vec<f64>>,
    pub inactive: bool,
}

/// Full export of a league run, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullExport {
    pub league: String,
    /// Ascending by final rating, active entities first, inactive appended
    /// after so layered plots draw them consistently
    pub series: Vec<SeriesExport>,
    /// Season labels for axis/boundary annotation
    pub seasons: Vec<String>,
}

impl League {
    /// Active entities as `(abbrev, rounded rating)`, best first
    pub fn active_ratings_table(&self) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, f64)> = self
            .entities()
            .filter(|e| !e.inactive && Some(&e.id) != self.placeholder_id())
            .map(|e| (e.abbrev.clone(), e.rating()))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows.into_iter()
            .map(|(abbrev, rating)| (abbrev, rating.round() as i64))
            .collect()
    }

    /// Every entity's aligned history plus the season list.
    ///
    /// The placeholder entity, when configured, is excluded: its history is
    /// an artifact of absorbed data gaps, not a real competitor's record.
    pub fn full_export(&self) -> FullExport {
        let mut entities: Vec<_> = self
            .entities()
            .filter(|e| Some(&e.id) != self.placeholder_id())
            .collect();
        entities.sort_by(|a, b| a.rating().total_cmp(&b.rating()));

        let mut series: Vec<SeriesExport> = Vec::with_capacity(entities.len());
        let mut shelved: Vec<SeriesExport> = Vec::new();
        for entity in entities {
            let export = SeriesExport {
                abbrev: entity.abbrev.clone(),
                color: entity
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SERIES_COLOR.to_string()),
                history: entity.history().to_vec(),
                inactive: entity.inactive,
            };
            if entity.inactive {
                shelved.push(export);
            } else {
                series.push(export);
            }
        }
        series.append(&mut shelved);

        FullExport {
            league: self.name().to_string(),
            series,
            seasons: self.seasons().to_vec(),
        }
    }
}
