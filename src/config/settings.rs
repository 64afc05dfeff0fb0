use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_DATABASE_PATH: &str = "club_league.db";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub api_key: Option<String>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.clubleague.gg/v1".to_string(),
            user_agent: "ClubLeagueResults/1.0".to_string(),
            timeout_secs: 30,
            rate_limit_ms: 200, // 5 req/sec
            api_key: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessingSettings {
    /// How far back each run asks the feed for finished tournaments
    pub lookback_hours: i64,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self { lookback_hours: 48 }
    }
}

impl ProcessingSettings {
    pub fn validate(&self) -> Result<()> {
        if self.lookback_hours <= 0 {
            bail!("Lookback window must be positive, got {} hours", self.lookback_hours);
        }
        self.lookback()?;
        Ok(())
    }

    /// `(since, until)` for a run starting at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        self.validate()?;
        let since = now
            .checked_sub_signed(self.lookback()?)
            .with_context(|| format!("Lookback of {} hours reaches before the calendar start", self.lookback_hours))?;
        Ok((since, now))
    }

    fn lookback(&self) -> Result<Duration> {
        Duration::try_hours(self.lookback_hours)
            .with_context(|| format!("Lookback window of {} hours is out of range", self.lookback_hours))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedSettings,
    pub processing: ProcessingSettings,
    pub database_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedSettings::default(),
            processing: ProcessingSettings::default(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` provides. Unparseable numbers
    /// are errors rather than silently falling back.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("FEED_BASE_URL") {
            config.feed.base_url = url.trim_end_matches('/').to_string();
        }
        config.feed.api_key = lookup("FEED_API_KEY").filter(|key| !key.is_empty());
        config.feed.timeout_secs = parse_or(&lookup, "FEED_TIMEOUT_SECS", config.feed.timeout_secs)?;
        config.feed.rate_limit_ms = parse_or(&lookup, "FEED_RATE_LIMIT_MS", config.feed.rate_limit_ms)?;
        config.processing.lookback_hours =
            parse_or(&lookup, "LOOKBACK_HOURS", config.processing.lookback_hours)?;
        if let Some(path) = lookup("DATABASE_PATH") {
            config.database_path = path;
        }

        config.processing.validate()?;
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
