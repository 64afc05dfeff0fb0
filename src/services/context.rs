use anyhow::{Context, Result};
use log::info;

use crate::domain::RosterIndex;
use crate::store::StatsRepository;

/// State shared by every tournament of one run. Built fresh per run and
/// passed by reference; nothing here outlives the run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub season: i64,
    pub roster: RosterIndex,
}

impl RunContext {
    pub fn new(season: i64, roster: RosterIndex) -> Self {
        Self { season, roster }
    }

    pub fn load<S: StatsRepository>(store: &S) -> Result<Self> {
        let season = store.current_season().context("Failed to load current season")?;
        let roster = store.load_roster().context("Failed to load roster")?;
        info!("  → Season {}, {} registered competitors", season, roster.len());
        Ok(Self::new(season, roster))
    }
}
