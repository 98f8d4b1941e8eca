//! Common types shared across the rating engine and data sources

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stable identifier for a rated team or player
pub type EntityId = String;

/// One row of a team roster file: stable id, short display tag, full name
/// and an optional plot color.
///
/// A repeated id registers additional aliases for an existing entity rather
/// than creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: EntityId,
    pub abbrev: String,
    pub name: String,
    pub color: Option<String>,
}

/// One match result as supplied by the data source.
///
/// Sides may be referenced by stable id or display name depending on the
/// source. Scores and the round marker are optional because unplayed or
/// forfeited rounds come through with the fields blank; such records are
/// skipped, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub side1: String,
    pub side2: String,
    pub side1_score: Option<u32>,
    pub side2_score: Option<u32>,
    pub date: Option<NaiveDateTime>,
    pub best_of: Option<u32>,
    pub round: Option<String>,
}

impl MatchRecord {
    /// Returns both scores when the record carries a decided, usable result:
    /// scores present, a round marker present, not a tie and not 0-0.
    ///
    /// The tie/0-0 exclusion keeps the margin-of-victory term well-defined
    /// downstream.
    pub fn decided_scores(&self) -> Option<(u32, u32)> {
        self.round.as_deref()?;
        let s1 = self.side1_score?;
        let s2 = self.side2_score?;
        if s1 == s2 {
            return None;
        }
        Some((s1, s2))
    }
}

/// A season boundary derived from the tournament schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonBoundary {
    /// Tournament whose start marks the boundary
    pub tournament: String,
    /// Label recorded in the season list
    pub label: String,
    /// Whether ratings regress toward the regional mean at this boundary
    pub hard_reset: bool,
}
