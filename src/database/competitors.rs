use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// Keep the competitor's registration snapshot current. An unregistered
/// finisher still gets a row so their points have an owner.
pub fn upsert_competitor(
    conn: &Connection,
    competitor_id: &str,
    name: Option<&str>,
    registered: bool,
    club_id: Option<i64>,
) -> Result<()> {
    let sql = "INSERT INTO competitors (competitor_id, name, registered, club_id) VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(competitor_id) DO UPDATE SET
                   name = COALESCE(excluded.name, competitors.name),
                   registered = excluded.registered,
                   club_id = excluded.club_id,
                   updated_at = CURRENT_TIMESTAMP";

    conn.execute(sql, params![competitor_id, name, registered, club_id])
        .with_context(|| format!("Failed to upsert competitor {}", competitor_id))?;
    Ok(())
}
