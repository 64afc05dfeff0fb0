use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

const CURRENT_SEASON_KEY: &str = "current_season";
pub const DEFAULT_SEASON: i64 = 1;

/// Season all stats of this run are written to. Defaults to season 1 on a
/// fresh database.
pub fn get_current_season(conn: &Connection) -> Result<i64> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![CURRENT_SEASON_KEY],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to read current season")?;

    match value {
        None => Ok(DEFAULT_SEASON),
        Some(raw) => {
            let season = raw
                .parse::<i64>()
                .with_context(|| format!("Stored season is not a number: {}", raw))?;
            validate_season(season)?;
            Ok(season)
        }
    }
}

pub fn set_current_season(conn: &Connection, season: i64) -> Result<()> {
    validate_season(season)?;
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![CURRENT_SEASON_KEY, season.to_string()],
    )
    .context("Failed to store current season")?;
    Ok(())
}

// Scope 0 is reserved for lifetime totals.
pub fn validate_season(season: i64) -> Result<()> {
    if season < 1 {
        bail!("Season must be a positive number, got {}", season);
    }
    Ok(())
}
