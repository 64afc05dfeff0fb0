use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::{normalize_competitor_id, ClubRef, RosterEntry, RosterIndex};

pub fn upsert_roster_entry(
    conn: &Connection,
    competitor_id: &str,
    name: &str,
    club_id: Option<i64>,
) -> Result<()> {
    let sql = "INSERT INTO roster (competitor_id, name, club_id) VALUES (?1, ?2, ?3)
               ON CONFLICT(competitor_id) DO UPDATE SET name = excluded.name, club_id = excluded.club_id";

    conn.execute(sql, params![normalize_competitor_id(competitor_id), name, club_id])
        .context("Failed to upsert roster entry")?;
    Ok(())
}

pub fn load_roster(conn: &Connection) -> Result<RosterIndex> {
    let sql = "SELECT r.competitor_id, r.name, c.id, c.name FROM roster r LEFT JOIN clubs c ON c.id = r.club_id";

    let mut stmt = conn.prepare(sql)?;
    let entries = stmt
        .query_map([], |row| {
            let club_id: Option<i64> = row.get(2)?;
            let club_name: Option<String> = row.get(3)?;
            let club = club_id.zip(club_name).map(|(id, name)| ClubRef { id, name });
            Ok((
                row.get::<_, String>(0)?,
                RosterEntry {
                    name: row.get(1)?,
                    club,
                },
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load roster")?;

    Ok(entries.into_iter().collect())
}
