//! Wiki cargoquery client for tournaments and match results
//!
//! The wiki exposes its tournament and match tables through the `cargoquery`
//! API action; every response is a list of rows with string-valued fields.
//! Row parsing is split out from the HTTP calls so it stays testable.

use crate::error::{LeagueError, Result};
use crate::types::MatchRecord;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://lol.fandom.com/api.php";

/// Tournament name fragments that are never rated: promotion/qualifier
/// brackets and exhibition events
const IGNORED_TOURNAMENTS: &[&str] = &[
    "Promotion",
    "Play-In",
    "Rift Rivals",
    "EU Face-Off",
    "Mid-Season Showdown 2020",
    "IWCT",
];

/// Supplier of the tournament schedule and per-tournament match results
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Ordered tournament names for a set of regions, earliest first
    async fn list_tournaments(
        &self,
        regions: &[String],
        start_year: i32,
        stop_date: NaiveDate,
    ) -> Result<Vec<String>>;

    /// Ordered match results for one tournament. `force_fetch` asks caching
    /// layers to bypass any stored copy; the raw client ignores it.
    async fn season_results(&self, tournament: &str, force_fetch: bool)
        -> Result<Vec<MatchRecord>>;
}

#[derive(Debug, Deserialize)]
struct CargoResponse {
    #[serde(default)]
    cargoquery: Vec<CargoRow>,
}

#[derive(Debug, Deserialize)]
struct CargoRow {
    title: HashMap<String, Option<String>>,
}

/// HTTP client over the wiki's cargoquery action
pub struct LeaguepediaClient {
    http: reqwest::Client,
    api_url: String,
}

impl LeaguepediaClient {
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    async fn cargoquery(&self, params: &[(&str, &str)]) -> Result<Vec<CargoRow>> {
        let mut query = vec![
            ("action", "cargoquery"),
            ("format", "json"),
            ("limit", "max"),
        ];
        query.extend_from_slice(params);

        let response = self
            .http
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| LeagueError::SourceUnavailable {
                message: e.to_string(),
            })?;

        let body: CargoResponse =
            response
                .json()
                .await
                .map_err(|e| LeagueError::SourceUnavailable {
                    message: format!("malformed cargoquery response: {e}"),
                })?;
        Ok(body.cargoquery)
    }
}

#[async_trait]
impl MatchSource for LeaguepediaClient {
    async fn list_tournaments(
        &self,
        regions: &[String],
        start_year: i32,
        stop_date: NaiveDate,
    ) -> Result<Vec<String>> {
        let where_clause = tournaments_where_clause(regions, start_year, stop_date);
        let rows = self
            .cargoquery(&[
                ("tables", "Tournaments=T"),
                ("fields", "T.Name"),
                ("where", &where_clause),
                ("order_by", "T.DateStart ASC"),
            ])
            .await?;

        let names = rows
            .iter()
            .filter_map(|row| row.title.get("Name").cloned().flatten())
            .filter(|name| !IGNORED_TOURNAMENTS.iter().any(|frag| name.contains(frag)))
            .collect();
        Ok(names)
    }

    async fn season_results(
        &self,
        tournament: &str,
        _force_fetch: bool,
    ) -> Result<Vec<MatchRecord>> {
        debug!(tournament, "fetching match results");
        let where_clause = format!("T.Name=\"{tournament}\"");
        let rows = self
            .cargoquery(&[
                ("tables", "MatchSchedule=MS, Tournaments=T"),
                (
                    "fields",
                    "MS.Team1,MS.Team2,MS.Team1Score,MS.Team2Score,MS.DateTime_UTC,MS.BestOf,MS.Round",
                ),
                ("join_on", "T.OverviewPage=MS.OverviewPage"),
                ("where", &where_clause),
                ("order_by", "MS.DateTime_UTC ASC"),
            ])
            .await?;

        Ok(rows.iter().map(|row| record_from_row(&row.title)).collect())
    }
}

fn tournaments_where_clause(regions: &[String], start_year: i32, stop_date: NaiveDate) -> String {
    let icon_filter = regions
        .iter()
        .map(|region| format!("T.LeagueIconKey=\"{region}\""))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!(
        "({icon_filter}) AND T.DateStart > \"{start_year}-01-01\" AND T.DateStart < \"{stop_date}\""
    )
}

/// Build a match record from one cargoquery row; blank or missing fields
/// stay `None` and are tolerated downstream
fn record_from_row(title: &HashMap<String, Option<String>>) -> MatchRecord {
    let field = |key: &str| -> Option<String> {
        title
            .get(key)
            .cloned()
            .flatten()
            .filter(|v| !v.is_empty())
    };
    MatchRecord {
        side1: field("Team1").unwrap_or_default(),
        side2: field("Team2").unwrap_or_default(),
        side1_score: field("Team1Score").and_then(|v| v.parse().ok()),
        side2_score: field("Team2Score").and_then(|v| v.parse().ok()),
        date: field("DateTime UTC")
            .and_then(|v| NaiveDateTime::parse_from_str(&v, "%Y-%m-%d %H:%M:%S").ok()),
        best_of: field("BestOf").and_then(|v| v.parse().ok()),
        round: field("Round"),
    }
}
