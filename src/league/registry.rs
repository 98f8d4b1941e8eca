//! The league registry: entity ownership and match processing
//!
//! A `League` exclusively owns every entity it rates. Match results arrive
//! in chronological order, are resolved to entities by id or alias, and are
//! fed through the configured rating model one at a time; season boundaries
//! close the open history segment for every entity at once.

use crate::config::RatingConfig;
use crate::error::{LeagueError, Result};
use crate::league::entity::Entity;
use crate::rating::{AccuracyReport, BrierTracker, RatingModel};
use crate::types::{EntityId, MatchRecord, TeamInfo};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Registry of rated entities for one league run
pub struct League {
    name: String,
    model: Box<dyn RatingModel>,
    config: RatingConfig,
    entities: HashMap<EntityId, Entity>,
    /// Entity ids grouped by registration region, used only for the
    /// regression-to-mean reset
    regions: HashMap<String, Vec<EntityId>>,
    /// Normalized season labels, in the order seasons were opened
    seasons: Vec<String>,
    brier: BrierTracker,
    /// When set, unresolved match references are absorbed by this entity
    /// instead of skipping the match
    placeholder: Option<EntityId>,
}

impl League {
    pub fn new(name: impl Into<String>, model: Box<dyn RatingModel>, config: RatingConfig) -> Self {
        Self {
            name: name.into(),
            model,
            config,
            entities: HashMap::new(),
            regions: HashMap::new(),
            seasons: Vec::new(),
            brier: BrierTracker::new(),
            placeholder: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seasons(&self) -> &[String] {
        &self.seasons
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub(crate) fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub(crate) fn placeholder_id(&self) -> Option<&EntityId> {
        self.placeholder.as_ref()
    }

    /// Register a team under a region, merging aliases when the id is
    /// already known. Exactly one entity exists per id no matter how many
    /// historical names register it.
    pub fn register_entity(&mut self, info: TeamInfo, region: &str) {
        match self.entities.get_mut(&info.id) {
            Some(existing) => existing.merge_aliases(&info),
            None => {
                self.regions
                    .entry(region.to_string())
                    .or_default()
                    .push(info.id.clone());
                let entity = Entity::new(info, self.config.initial_rating);
                self.entities.insert(entity.id.clone(), entity);
            }
        }
    }

    /// Opt in to absorbing unresolved match references with a placeholder
    /// entity. The placeholder belongs to no region and is excluded from
    /// exports; every absorption is reported with a warning.
    pub fn set_placeholder(&mut self, info: TeamInfo) {
        let id = info.id.clone();
        if !self.entities.contains_key(&id) {
            // Keep the placeholder's history shape in step with everyone
            // else's by opening the segments it missed.
            let mut entity = Entity::new(info, self.config.initial_rating);
            for _ in &self.seasons {
                entity.begin_season(self.config.initial_rating);
            }
            self.entities.insert(id.clone(), entity);
        }
        self.placeholder = Some(id);
    }

    /// Resolve a match-side reference to an entity: O(1) by id first, then
    /// a linear fallback over names, abbrevs and recorded aliases
    pub fn resolve_entity(&self, reference: &str) -> Result<&Entity> {
        if let Some(entity) = self.entities.get(reference) {
            return Ok(entity);
        }
        self.entities
            .values()
            .find(|e| e.known_as(reference))
            .ok_or_else(|| {
                LeagueError::EntityNotFound {
                    reference: reference.to_string(),
                }
                .into()
            })
    }

    fn resolve_side(&self, reference: &str) -> Option<EntityId> {
        match self.resolve_entity(reference) {
            Ok(entity) => Some(entity.id.clone()),
            Err(_) => match &self.placeholder {
                Some(id) => {
                    warn!(reference, "unknown side absorbed by placeholder entity");
                    Some(id.clone())
                }
                None => None,
            },
        }
    }

    /// Process one match result. Data-quality gaps (missing score or round,
    /// ties, unresolved sides) skip the record and return `Ok(false)`; only
    /// a model contract violation (non-finite output) is a hard error.
    pub fn apply_match(&mut self, record: &MatchRecord) -> Result<bool> {
        let Some((s1, s2)) = record.decided_scores() else {
            debug!(side1 = %record.side1, side2 = %record.side2, "skipping undecided record");
            return Ok(false);
        };

        let (Some(id1), Some(id2)) = (
            self.resolve_side(&record.side1),
            self.resolve_side(&record.side2),
        ) else {
            debug!(side1 = %record.side1, side2 = %record.side2, "skipping match with unknown side");
            return Ok(false);
        };

        let (winner_id, loser_id, score_w, score_l) = if s1 > s2 {
            (id1, id2, s1, s2)
        } else {
            (id2, id1, s2, s1)
        };

        let winner_rating = self.entities[&winner_id].rating();
        let loser_rating = self.entities[&loser_id].rating();
        let outcome = self
            .model
            .process_outcome(winner_rating, loser_rating, score_w, score_l);

        if !outcome.winner_rating.is_finite() || !outcome.loser_rating.is_finite() {
            return Err(LeagueError::NonFiniteRating {
                entity: self.entities[&winner_id].abbrev.clone(),
            }
            .into());
        }

        if let Some(entity) = self.entities.get_mut(&winner_id) {
            entity.update_rating(outcome.winner_rating);
        }
        if let Some(entity) = self.entities.get_mut(&loser_id) {
            entity.update_rating(outcome.loser_rating);
        }
        self.brier.record(outcome.forecast_miss);
        Ok(true)
    }

    /// Process an ordered batch of results
    pub fn apply_results(&mut self, records: &[MatchRecord]) -> Result<usize> {
        let mut applied = 0;
        for record in records {
            if self.apply_match(record)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Close the current season and open the next one.
    ///
    /// Aligns the finished segment, records the normalized label, and seeds
    /// a fresh one-element segment per entity. On a hard reset every rated
    /// entity's seed is blended toward its region's mean rating.
    pub fn open_new_season(&mut self, label: &str, hard_reset: bool) -> Result<()> {
        self.align()?;
        self.seasons.push(normalize_season_label(label));

        let regions: Vec<String> = self.regions.keys().cloned().collect();
        for region in regions {
            let Some(regional_mean) = self.regional_average(&region) else {
                continue;
            };
            let ids = self.regions[&region].clone();
            for id in ids {
                if let Some(entity) = self.entities.get_mut(&id) {
                    let seed = if hard_reset {
                        let w = self.config.regression_weight;
                        entity.rating() * w + regional_mean * (1.0 - w)
                    } else {
                        entity.rating()
                    };
                    entity.begin_season(seed);
                }
            }
        }

        // The placeholder sits outside every region but its history must
        // keep the same segment count as the rated entities.
        if let Some(id) = self.placeholder.clone() {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.begin_season(entity.rating());
            }
        }
        Ok(())
    }

    /// Mean rating of the entities registered under a region; `None` for an
    /// unknown or empty region
    pub fn regional_average(&self, region: &str) -> Option<f64> {
        let ids = self.regions.get(region)?;
        let ratings: Vec<f64> = ids
            .iter()
            .filter_map(|id| self.entities.get(id))
            .map(Entity::rating)
            .collect();
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }

    /// Forecast-accuracy diagnostic over every decisive match processed
    pub fn accuracy_report(&self) -> AccuracyReport {
        self.brier.report()
    }

    /// Win probability forecast between two referenced entities
    pub fn forecast(&self, side1: &str, side2: &str) -> Result<f64> {
        let a = self.resolve_entity(side1)?.rating();
        let b = self.resolve_entity(side2)?.rating();
        Ok(self.model.forecast(a, b))
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }
}

/// Trim a season label to start at its 4-digit year token when one exists;
/// labels without a year are used verbatim
pub fn normalize_season_label(label: &str) -> String {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let year = YEAR.get_or_init(|| Regex::new(r"\d{4}").expect("static year pattern"));
    match year.find(label) {
        Some(m) => label[m.start()..].to_string(),
        None => label.to_string(),
    }
}

impl fmt::Display for League {
    /// Plain-text ratings table of active entities, best first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Elo Ratings", self.name)?;
        for (abbrev, rating) in self.active_ratings_table() {
            writeln!(f, "  {abbrev:>5}  {rating}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::EloModel;

    fn team(id: &str, abbrev: &str, name: &str) -> TeamInfo {
        TeamInfo {
            id: id.to_string(),
            abbrev: abbrev.to_string(),
            name: name.to_string(),
            color: None,
        }
    }

    fn league() -> League {
        let config = RatingConfig::default();
        let mut league = League::new("LCS", Box::new(EloModel::new(config.clone())), config);
        league.register_entity(team("c9", "C9", "Cloud9"), "NA");
        league.register_entity(team("tl", "TL", "Team Liquid"), "NA");
        league
    }

    fn played(side1: &str, side2: &str, s1: u32, s2: u32) -> MatchRecord {
        MatchRecord {
            side1: side1.to_string(),
            side2: side2.to_string(),
            side1_score: Some(s1),
            side2_score: Some(s2),
            date: None,
            best_of: Some(5),
            round: Some("Round 1".to_string()),
        }
    }

    #[test]
    fn test_duplicate_registration_merges() {
        let mut league = league();
        league.register_entity(team("tl", "CRS", "Team Curse"), "NA");
        assert_eq!(league.entity_count(), 2);
        let by_alias = league.resolve_entity("Team Curse").unwrap();
        let by_id = league.resolve_entity("tl").unwrap();
        assert_eq!(by_alias.id, by_id.id);
    }

    #[test]
    fn test_resolution_falls_back_to_names() {
        let league = league();
        assert!(league.resolve_entity("c9").is_ok());
        assert!(league.resolve_entity("Cloud9").is_ok());
        assert!(league.resolve_entity("C9").is_ok());
        assert!(league.resolve_entity("DIG").is_err());
    }

    #[test]
    fn test_apply_match_worked_example() {
        let mut league = league();
        let applied = league.apply_match(&played("Cloud9", "Team Liquid", 2, 0)).unwrap();
        assert!(applied);

        let winner = league.resolve_entity("c9").unwrap().rating();
        let loser = league.resolve_entity("tl").unwrap().rating();
        assert!((winner - 1516.245).abs() < 1e-3);
        assert!((loser - 1483.755).abs() < 1e-3);

        // Zero-sum after a second, reversed result
        let before: f64 = winner + loser;
        league.apply_match(&played("Team Liquid", "Cloud9", 2, 1)).unwrap();
        let after = league.resolve_entity("c9").unwrap().rating()
            + league.resolve_entity("tl").unwrap().rating();
        assert!((before - after).abs() < 1e-9);

        let report = league.accuracy_report();
        assert_eq!(report.samples, 2);
    }

    #[test]
    fn test_gaps_are_skipped_not_fatal() {
        let mut league = league();
        // Unknown side
        assert!(!league.apply_match(&played("DIG", "C9", 2, 0)).unwrap());
        // Tie
        assert!(!league.apply_match(&played("C9", "TL", 1, 1)).unwrap());
        // Missing score
        let mut record = played("C9", "TL", 2, 0);
        record.side1_score = None;
        assert!(!league.apply_match(&record).unwrap());
        assert_eq!(league.accuracy_report().samples, 0);
    }

    #[test]
    fn test_placeholder_absorbs_unknown_sides() {
        let mut league = league();
        league.set_placeholder(team("dummy", "???", "Placeholder"));
        assert!(league.apply_match(&played("Mystery Org", "C9", 0, 2)).unwrap());
        // C9 beat the placeholder, so its rating moved
        assert!(league.resolve_entity("c9").unwrap().rating() > 1500.0);
    }

    #[test]
    fn test_open_new_season_structure() {
        let mut league = league();
        league.apply_match(&played("C9", "TL", 2, 0)).unwrap();
        league.open_new_season("LCS 2016 Spring", false).unwrap();

        assert_eq!(league.seasons(), &["2016 Spring".to_string()]);
        for entity in league.entities() {
            assert_eq!(entity.history().len(), 2);
            assert_eq!(entity.open_segment(), &[entity.rating()]);
        }
    }

    #[test]
    fn test_hard_reset_regresses_toward_regional_mean() {
        let mut league = league();
        league.apply_match(&played("C9", "TL", 2, 0)).unwrap();

        // Zero-sum updates keep the regional mean at the initial rating
        let mean = league.regional_average("NA").unwrap();
        assert!((mean - 1500.0).abs() < 1e-9);

        let before = league.resolve_entity("c9").unwrap().rating();
        league.open_new_season("LCS 2016 Spring", true).unwrap();
        let after = league.resolve_entity("c9").unwrap().rating();
        assert!((after - (before * 0.75 + mean * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_regional_average_unknown_region() {
        assert_eq!(league().regional_average("EU"), None);
    }

    #[test]
    fn test_forecast_between_references() {
        let mut league = league();
        assert!((league.forecast("C9", "Team Liquid").unwrap() - 0.5).abs() < 1e-9);
        league.apply_match(&played("C9", "TL", 2, 0)).unwrap();
        assert!(league.forecast("C9", "TL").unwrap() > 0.5);
        assert!(league.forecast("C9", "DIG").is_err());
    }

    #[test]
    fn test_normalize_season_label() {
        assert_eq!(normalize_season_label("LCS 2019 Summer"), "2019 Summer");
        assert_eq!(normalize_season_label("MSI"), "MSI");
    }

    #[test]
    fn test_display_table() {
        let mut league = league();
        league.apply_match(&played("C9", "TL", 2, 0)).unwrap();
        league.align().unwrap();
        let table = league.to_string();
        assert!(table.starts_with("LCS Elo Ratings"));
        let c9_pos = table.find("C9").unwrap();
        let tl_pos = table.find("TL").unwrap();
        assert!(c9_pos < tl_pos, "winner listed first:\n{table}");
    }
}
