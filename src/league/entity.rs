//! Rated entities and their season-segmented rating histories

use crate::types::{EntityId, TeamInfo};
use serde::{Deserialize, Serialize};

/// A rated team (or player) owned by the league.
///
/// `history` is a list of season segments; each segment holds one rating
/// snapshot per processed match, in order. Invariants maintained here:
/// segments are never empty, and the last snapshot of the last segment
/// always equals `rating`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub abbrev: String,
    pub name: String,
    /// Historical names and tags this entity has competed under, used only
    /// for match-result resolution
    pub aliases: Vec<String>,
    pub color: Option<String>,
    rating: f64,
    history: Vec<Vec<f64>>,
    /// Set during alignment: true iff the entity recorded no rating movement
    /// in the most recent season
    pub inactive: bool,
}

impl Entity {
    pub fn new(info: TeamInfo, initial_rating: f64) -> Self {
        Self {
            id: info.id,
            abbrev: info.abbrev,
            name: info.name,
            aliases: Vec::new(),
            color: info.color,
            rating: initial_rating,
            history: vec![vec![initial_rating]],
            inactive: false,
        }
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn history(&self) -> &[Vec<f64>] {
        &self.history
    }

    /// Apply a rating update from a processed match, appending the snapshot
    /// to the open season segment
    pub fn update_rating(&mut self, new_rating: f64) {
        self.rating = new_rating;
        self.open_segment_mut().push(new_rating);
    }

    /// Merge another registration of the same id: the extra name and abbrev
    /// become resolution aliases. Idempotent.
    pub fn merge_aliases(&mut self, info: &TeamInfo) {
        for alias in [&info.name, &info.abbrev] {
            if !self.known_as(alias) {
                self.aliases.push(alias.clone());
            }
        }
    }

    /// Whether `reference` matches this entity's id, name, abbrev or any
    /// recorded alias
    pub fn known_as(&self, reference: &str) -> bool {
        self.id == reference
            || self.name == reference
            || self.abbrev == reference
            || self.aliases.iter().any(|a| a == reference)
    }

    pub fn open_segment(&self) -> &[f64] {
        self.history.last().map(Vec::as_slice).unwrap_or(&[])
    }

    fn open_segment_mut(&mut self) -> &mut Vec<f64> {
        // History is seeded with one segment at construction and only ever
        // grows, so a last segment always exists.
        if self.history.is_empty() {
            self.history.push(vec![self.rating]);
        }
        self.history.last_mut().expect("history is never empty")
    }

    /// Flat-line pad the open segment to `len` snapshots
    pub(crate) fn pad_open_segment(&mut self, len: usize) {
        let rating = self.rating;
        let segment = self.open_segment_mut();
        while segment.len() < len {
            segment.push(rating);
        }
    }

    /// Close the current season: set the (possibly regressed) rating and
    /// open a fresh one-element segment seeded with it
    pub(crate) fn begin_season(&mut self, seed_rating: f64) {
        self.rating = seed_rating;
        self.history.push(vec![seed_rating]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> TeamInfo {
        TeamInfo {
            id: id.to_string(),
            abbrev: "TL".to_string(),
            name: "Team Liquid".to_string(),
            color: None,
        }
    }

    #[test]
    fn test_new_entity_seeds_history() {
        let entity = Entity::new(info("tl"), 1500.0);
        assert_eq!(entity.history(), &[vec![1500.0]]);
        assert_eq!(entity.rating(), 1500.0);
    }

    #[test]
    fn test_update_appends_to_open_segment() {
        let mut entity = Entity::new(info("tl"), 1500.0);
        entity.update_rating(1516.0);
        entity.update_rating(1502.0);
        assert_eq!(entity.open_segment(), &[1500.0, 1516.0, 1502.0]);
        assert_eq!(entity.rating(), 1502.0);
    }

    #[test]
    fn test_begin_season_opens_seeded_segment() {
        let mut entity = Entity::new(info("tl"), 1500.0);
        entity.update_rating(1540.0);
        entity.begin_season(1530.0);
        assert_eq!(entity.history().len(), 2);
        assert_eq!(entity.open_segment(), &[1530.0]);
        assert_eq!(entity.rating(), 1530.0);
    }

    #[test]
    fn test_alias_merge_is_idempotent() {
        let mut entity = Entity::new(info("tl"), 1500.0);
        let renamed = TeamInfo {
            id: "tl".to_string(),
            abbrev: "CRS".to_string(),
            name: "Team Curse".to_string(),
            color: None,
        };
        entity.merge_aliases(&renamed);
        entity.merge_aliases(&renamed);
        assert_eq!(entity.aliases, vec!["Team Curse", "CRS"]);
        assert!(entity.known_as("Team Curse"));
        assert!(entity.known_as("TL"));
        assert!(!entity.known_as("C9"));
    }

    #[test]
    fn test_padding_repeats_current_rating() {
        let mut entity = Entity::new(info("tl"), 1500.0);
        entity.update_rating(1510.0);
        entity.pad_open_segment(5);
        assert_eq!(entity.open_segment(), &[1500.0, 1510.0, 1510.0, 1510.0, 1510.0]);
        // Already long enough: no-op
        entity.pad_open_segment(3);
        assert_eq!(entity.open_segment().len(), 5);
    }
}
