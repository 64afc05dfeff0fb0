use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::ProcessedTournament;
use crate::scoring::Tier;

pub fn is_processed(conn: &Connection, tournament_id: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM processed_tournaments WHERE tournament_id = ?1",
            params![tournament_id],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to check processed marker")?;

    Ok(found.is_some())
}

pub fn mark_processed(
    conn: &Connection,
    tournament_id: &str,
    name: Option<&str>,
    tier: &str,
    season: i64,
    processed_at: NaiveDateTime,
) -> Result<()> {
    let sql = "INSERT INTO processed_tournaments (tournament_id, name, tier, season, processed_at) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(sql, params![tournament_id, name, tier, season, processed_at])
        .with_context(|| format!("Failed to write processed marker for {}", tournament_id))?;
    Ok(())
}

pub fn find_processed(conn: &Connection, tournament_id: &str) -> Result<Option<ProcessedTournament>> {
    let sql = "SELECT tournament_id, name, tier, season, processed_at FROM processed_tournaments WHERE tournament_id = ?1";

    conn.query_row(sql, params![tournament_id], |row| {
        Ok(ProcessedTournament {
            tournament_id: row.get(0)?,
            name: row.get(1)?,
            tier: row
                .get::<_, String>(2)?
                .parse::<Tier>()
                .map_err(|e: anyhow::Error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?,
            season: row.get(3)?,
            processed_at: row.get(4)?,
        })
    })
    .optional()
    .context("Failed to query processed tournament")
}

pub fn insert_podium_entry(
    conn: &Connection,
    tournament_id: &str,
    position: usize,
    party_id: &str,
    placement: u8,
    competitor_ids: &[String],
) -> Result<()> {
    let sql = "INSERT INTO tournament_podiums (tournament_id, position, party_id, placement, competitor_ids) VALUES (?1, ?2, ?3, ?4, ?5)";

    conn.execute(
        sql,
        params![
            tournament_id,
            position as i64,
            party_id,
            placement,
            competitor_ids.join(",")
        ],
    )
    .context("Failed to insert podium entry")?;
    Ok(())
}

pub fn list_podium(conn: &Connection, tournament_id: &str) -> Result<Vec<(String, u8)>> {
    let sql = "SELECT party_id, placement FROM tournament_podiums WHERE tournament_id = ?1 ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
