use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::models::Club;
use super::stats::decimal_from_sql;

pub fn upsert_club(conn: &Connection, name: &str) -> Result<Club> {
    if let Some(existing) = find_by_name(conn, name)? {
        return Ok(existing);
    }

    let sql = "INSERT INTO clubs (name) VALUES (?1) RETURNING id, name, member_points";
    conn.query_row(sql, params![name], parse_club_row)
        .context("Failed to insert new club")
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Club>> {
    let sql = "SELECT id, name, member_points FROM clubs WHERE name = ?1";

    conn.query_row(sql, params![name], parse_club_row)
        .optional()
        .context("Failed to query club by name")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Club>> {
    let sql = "SELECT id, name, member_points FROM clubs WHERE id = ?1";

    conn.query_row(sql, params![id], parse_club_row)
        .optional()
        .context("Failed to query club by id")
}

fn parse_club_row(row: &rusqlite::Row) -> rusqlite::Result<Club> {
    Ok(Club {
        id: row.get(0)?,
        name: row.get(1)?,
        member_points: decimal_from_sql(row, 2)?,
    })
}

/// Sum of the lifetime point balances of the club's roster members
pub fn sum_member_points(conn: &Connection, club_id: i64) -> Result<Decimal> {
    let sql = "SELECT s.total_points FROM roster r
               JOIN stat_totals s
                 ON s.entity_kind = 'competitor' AND s.entity_id = r.competitor_id AND s.scope = 0
               WHERE r.club_id = ?1";

    let mut stmt = conn.prepare(sql)?;
    let balances = stmt
        .query_map(params![club_id], |row| decimal_from_sql(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to sum member points")?;

    Ok(balances.into_iter().sum())
}

/// Recompute the club's member point figure and store it when it changed.
/// Returns whether a write happened.
pub fn refresh_member_points(conn: &Connection, club: &Club) -> Result<bool> {
    let recomputed = sum_member_points(conn, club.id)?;
    if recomputed == club.member_points {
        return Ok(false);
    }

    conn.execute(
        "UPDATE clubs SET member_points = ?1 WHERE id = ?2",
        params![recomputed.to_string(), club.id],
    )
    .with_context(|| format!("Failed to update member points for club {}", club.id))?;

    Ok(true)
}
