//! Command-line entry point
//!
//! Builds a league per region set, seeds it from the roster files, replays
//! every tournament in chronological order with season resets at split
//! transitions, then prints the ratings table and accuracy report and
//! writes the plot and JSON export.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use league_elo::config::AppConfig;
use league_elo::league::League;
use league_elo::plot::write_plot_html;
use league_elo::rating::{EloModel, NaiveModel, RatingModel};
use league_elo::source::{
    derive_boundaries, load_team_file, CachedSource, LeaguepediaClient, MatchSource,
};
use std::path::PathBuf;
use tracing::info;

/// Region selection: a single league, the international pool, or every
/// region in turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Region {
    Na,
    Eu,
    Kr,
    Cn,
    Int,
    All,
}

impl Region {
    /// Region keys pooled into one league for this selection
    fn keys(self) -> Vec<&'static str> {
        match self {
            Region::Na => vec!["NA"],
            Region::Eu => vec!["EU"],
            Region::Kr => vec!["KR"],
            Region::Cn => vec!["CN"],
            Region::Int => vec!["NA", "EU", "KR", "CN", "INT"],
            Region::All => unreachable!("expanded before running"),
        }
    }
}

/// Season-aware Elo ratings for professional league match histories
#[derive(Parser)]
#[command(name = "league-elo", version, about)]
struct Args {
    /// Region to run the model on
    #[arg(value_enum, default_value = "int")]
    region: Region,

    /// Date to stop processing results (YYYY-MM-DD), defaults to today
    stop_date: Option<NaiveDate>,

    /// Use the naive baseline rating model instead of Elo
    #[arg(long)]
    naive_model: bool,

    /// Refetch every season instead of trusting the cache
    #[arg(long)]
    refresh: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the output directory for plots and exports
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.service.log_level = level.clone();
    }
    if let Some(dir) = &args.out_dir {
        config.data.output_dir = dir.clone();
    }
    init_logging(&config.service.log_level)?;

    let stop_date = args
        .stop_date
        .unwrap_or_else(|| Local::now().date_naive());
    let source = CachedSource::new(LeaguepediaClient::new(), config.data.cache_dir.clone());

    let selections = match args.region {
        Region::All => vec![Region::Na, Region::Eu, Region::Kr, Region::Cn, Region::Int],
        region => vec![region],
    };
    for region in selections {
        run_region(&config, &source, region, args.naive_model, stop_date, args.refresh).await?;
    }
    Ok(())
}

/// Replay one region set from the first configured year up to `stop_date`
async fn run_region(
    config: &AppConfig,
    source: &impl MatchSource,
    region: Region,
    naive_model: bool,
    stop_date: NaiveDate,
    refresh: bool,
) -> Result<()> {
    let keys = region.keys();
    let league_name = keys.join("_");
    let model: Box<dyn RatingModel> = if naive_model {
        Box::new(NaiveModel::new(config.rating.clone()))
    } else {
        Box::new(EloModel::new(config.rating.clone()))
    };
    let mut league = League::new(&league_name, model, config.rating.clone());

    let mut start_year = i32::MIN;
    let mut regions = Vec::new();
    for key in &keys {
        let settings = config
            .region(key)
            .ok_or_else(|| anyhow!("region {key} is not configured"))?;
        let path = config.data.team_file_dir.join(&settings.team_file);
        for team in load_team_file(&path)? {
            league.register_entity(team, &settings.key);
        }
        start_year = start_year.max(settings.start_year);
        regions.push(settings.key.clone());
    }
    info!(
        league = %league_name,
        teams = league.entity_count(),
        model = league.model_name(),
        "league seeded"
    );

    let tournaments = source.list_tournaments(&regions, start_year, stop_date).await?;
    let boundaries = derive_boundaries(&tournaments);
    let last_transition = boundaries.last().map(|b| b.tournament.clone());

    let mut force_fetch = refresh;
    for tournament in &tournaments {
        if let Some(boundary) = boundaries.iter().find(|b| &b.tournament == tournament) {
            league.open_new_season(&boundary.label, boundary.hard_reset)?;
            // The in-progress split may still gain results; stop trusting
            // the cache from here on
            if Some(tournament) == last_transition.as_ref() {
                force_fetch = true;
            }
        }
        let results = source.season_results(tournament, force_fetch).await?;
        let applied = league.apply_results(&results)?;
        info!(tournament = %tournament, applied, total = results.len(), "processed");
    }

    league.align()?;
    println!("{}", league.accuracy_report());
    println!("{league}");

    let export = league.full_export();
    let out_dir = &config.data.output_dir;
    std::fs::create_dir_all(out_dir)?;
    let json_path = out_dir.join(format!("{league_name}_elo.json"));
    std::fs::write(&json_path, serde_json::to_string_pretty(&export)?)?;
    let html_path = out_dir.join(format!("{league_name}_elo.html"));
    write_plot_html(&export, config.rating.initial_rating, &html_path)?;
    info!(json = %json_path.display(), html = %html_path.display(), "exports written");
    Ok(())
}
