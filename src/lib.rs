pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod http;
pub mod rate_limiter;
pub mod scoring;
pub mod services;
pub mod store;
pub mod teams;

use anyhow::Result;
use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::database::{settings, setup, DbPool, EntityKind};
use crate::feed::FeedClient;
use crate::services::registration::register_competitor;
use crate::services::standings::{StandingsQuery, StandingsService};
use crate::services::ResultProcessor;
use crate::store::SqliteStatsRepository;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_database(config: &AppConfig) -> Result<DbPool> {
    let pool = database::create_pool(&config.database_path)?;
    let conn = database::get_connection(&pool)?;
    setup::ensure_schema(&conn)?;
    Ok(pool)
}

pub fn handle_process(lookback_hours: Option<i64>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(hours) = lookback_hours {
        config.processing.lookback_hours = hours;
        config.processing.validate()?;
    }

    let store = SqliteStatsRepository::new(open_database(&config)?);
    let feed = FeedClient::new(&config.feed)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let mut processor = ResultProcessor::new(feed, store, config.processing.clone());
    let report = runtime.block_on(processor.run(Utc::now()))?;

    info!(
        "Season {}: {} newly recorded tournaments",
        report.season,
        report.newly_recorded()
    );
    Ok(())
}

pub fn handle_init(reset: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.database_path)?;
    let conn = database::get_connection(&pool)?;

    if reset {
        setup::reset_database(&conn)?;
    } else {
        setup::ensure_schema(&conn)?;
    }
    info!("Database ready at {}", config.database_path);
    Ok(())
}

pub fn handle_season(set: Option<i64>) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = open_database(&config)?;
    let conn = database::get_connection(&pool)?;

    if let Some(season) = set {
        settings::set_current_season(&conn, season)?;
        info!("Current season set to {}", season);
    }
    println!("{}", settings::get_current_season(&conn)?);
    Ok(())
}

pub fn handle_register(competitor_id: &str, name: &str, club: Option<&str>) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = open_database(&config)?;
    let conn = database::get_connection(&pool)?;
    register_competitor(&conn, competitor_id, name, club)?;
    Ok(())
}

pub fn handle_standings(competitors: bool, lifetime: bool, season: Option<i64>, limit: usize) -> Result<()> {
    let config = AppConfig::from_env()?;
    let service = StandingsService::new(open_database(&config)?);
    service.run(&StandingsQuery {
        kind: if competitors {
            EntityKind::Competitor
        } else {
            EntityKind::Club
        },
        lifetime,
        season,
        limit,
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
