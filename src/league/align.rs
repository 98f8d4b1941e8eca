//! Season alignment
//!
//! Entities play different numbers of matches in a season (byes, data gaps,
//! relegation), so at a boundary every open segment is flat-line padded to
//! the longest one. Position-by-position comparison across entities is what
//! makes the exported histories plottable on a shared axis.

use crate::error::{LeagueError, Result};
use crate::league::registry::League;

impl League {
    /// Pad every entity's open segment to the league-wide maximum length,
    /// then classify entities as inactive for the season.
    ///
    /// An entity is inactive iff its padded segment holds a single repeated
    /// value: either it played nothing, or it existed only as padding.
    /// Idempotent: a second call without new matches changes nothing.
    pub fn align(&mut self) -> Result<()> {
        let max_len = self
            .entities()
            .map(|e| e.open_segment().len())
            .max()
            .ok_or(LeagueError::EmptyRegistry)?;

        for entity in self.entities_mut() {
            entity.pad_open_segment(max_len);
            entity.inactive = is_flat(entity.open_segment());
        }
        Ok(())
    }
}

/// Whether every snapshot in a segment carries the same value.
///
/// Bitwise f64 comparison is intentional: padding copies values verbatim,
/// so a flat segment is exactly equal, not merely close.
fn is_flat(segment: &[f64]) -> bool {
    segment.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatingConfig;
    use crate::rating::EloModel;
    use crate::types::{MatchRecord, TeamInfo};

    fn team(id: &str, abbrev: &str) -> TeamInfo {
        TeamInfo {
            id: id.to_string(),
            abbrev: abbrev.to_string(),
            name: format!("Team {abbrev}"),
            color: None,
        }
    }

    fn played(side1: &str, side2: &str, s1: u32, s2: u32) -> MatchRecord {
        MatchRecord {
            side1: side1.to_string(),
            side2: side2.to_string(),
            side1_score: Some(s1),
            side2_score: Some(s2),
            date: None,
            best_of: Some(3),
            round: Some("Week 1".to_string()),
        }
    }

    fn three_team_league() -> League {
        let config = RatingConfig::default();
        let mut league = League::new("TEST", Box::new(EloModel::new(config.clone())), config);
        league.register_entity(team("a", "AAA"), "NA");
        league.register_entity(team("b", "BBB"), "NA");
        league.register_entity(team("c", "CCC"), "NA");
        league
    }

    #[test]
    fn test_align_pads_to_max_and_flags_inactive() {
        let mut league = three_team_league();
        league.apply_match(&played("AAA", "BBB", 2, 0)).unwrap();
        league.apply_match(&played("AAA", "BBB", 2, 1)).unwrap();
        league.align().unwrap();

        let lengths: Vec<usize> = league.entities().map(|e| e.open_segment().len()).collect();
        assert!(lengths.iter().all(|&len| len == 3));

        // C played nothing: flat segment, inactive
        let c = league.resolve_entity("c").unwrap();
        assert!(c.inactive);
        assert_eq!(c.open_segment(), &[1500.0, 1500.0, 1500.0]);

        let a = league.resolve_entity("a").unwrap();
        assert!(!a.inactive);
    }

    #[test]
    fn test_align_is_idempotent() {
        let mut league = three_team_league();
        league.apply_match(&played("AAA", "BBB", 2, 0)).unwrap();
        league.align().unwrap();

        let snapshot: Vec<Vec<Vec<f64>>> = {
            let mut h: Vec<(String, Vec<Vec<f64>>)> = league
                .entities()
                .map(|e| (e.id.clone(), e.history().to_vec()))
                .collect();
            h.sort_by(|x, y| x.0.cmp(&y.0));
            h.into_iter().map(|(_, hist)| hist).collect()
        };
        let flags: Vec<bool> = league.entities().map(|e| e.inactive).collect();

        league.align().unwrap();

        let mut again: Vec<(String, Vec<Vec<f64>>)> = league
            .entities()
            .map(|e| (e.id.clone(), e.history().to_vec()))
            .collect();
        again.sort_by(|x, y| x.0.cmp(&y.0));
        let again: Vec<Vec<Vec<f64>>> = again.into_iter().map(|(_, hist)| hist).collect();
        assert_eq!(snapshot, again);
        assert_eq!(flags, league.entities().map(|e| e.inactive).collect::<Vec<_>>());
    }

    #[test]
    fn test_align_empty_registry_is_an_error() {
        let config = RatingConfig::default();
        let mut league = League::new("EMPTY", Box::new(EloModel::new(config.clone())), config);
        let err = league.align().unwrap_err();
        assert!(err.to_string().contains("no entities registered"));
    }

    #[test]
    fn test_reactivation_after_quiet_season() {
        let mut league = three_team_league();
        league.apply_match(&played("AAA", "BBB", 2, 0)).unwrap();
        league.open_new_season("2020 Spring", false).unwrap();
        assert!(league.resolve_entity("c").unwrap().inactive);

        league.apply_match(&played("CCC", "BBB", 2, 1)).unwrap();
        league.align().unwrap();
        assert!(!league.resolve_entity("c").unwrap().inactive);
    }
}
