//! Season boundary derivation from the tournament schedule
//!
//! The wiki has no explicit season table; boundaries are inferred from the
//! split token in tournament names. A boundary is a hard reset (ratings
//! regress toward the regional mean) when the calendar year changes or the
//! Summer split begins; other transitions (playoffs into MSI, Worlds) keep
//! ratings as they are.

use crate::types::SeasonBoundary;
use regex::Regex;
use std::sync::OnceLock;

fn split_token(name: &str) -> Option<&str> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| {
        Regex::new(r"(Spring|Summer|MSI|Worlds|Mid-Season Cup|Lock In)")
            .expect("static split pattern")
    });
    token.find(name).map(|m| m.as_str())
}

fn year_token(name: &str) -> Option<&str> {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let year = YEAR.get_or_init(|| Regex::new(r"\d{4}").expect("static year pattern"));
    year.find(name).map(|m| m.as_str())
}

/// Scan an ordered tournament list and mark every split transition
pub fn derive_boundaries(tournaments: &[String]) -> Vec<SeasonBoundary> {
    let mut boundaries = Vec::new();
    let mut current_split: Option<&str> = None;
    let mut last_year: Option<&str> = None;

    for tournament in tournaments {
        let Some(split) = split_token(tournament) else {
            continue;
        };
        if current_split == Some(split) {
            continue;
        }
        current_split = Some(split);

        let year = year_token(tournament);
        let hard_reset = match year {
            Some(year) => year != last_year.unwrap_or_default() || split == "Summer",
            // No year token to compare against; keep ratings untouched
            None => split == "Summer",
        };
        let label = match (hard_reset, year) {
            (true, Some(year)) => format!("{year} {split}"),
            _ => split.to_string(),
        };
        if let Some(year) = year {
            last_year = Some(year);
        }

        boundaries.push(SeasonBoundary {
            tournament: tournament.clone(),
            label,
            hard_reset,
        });
    }
    boundaries
}
