use anyhow::{bail, Result};
use log::info;
use rusqlite::Connection;

use crate::database::{clubs, roster};
use crate::domain::normalize_competitor_id;

/// Add or update a roster entry, creating the club on first use.
pub fn register_competitor(
    conn: &Connection,
    competitor_id: &str,
    name: &str,
    club_name: Option<&str>,
) -> Result<String> {
    let normalized = normalize_competitor_id(competitor_id);
    if normalized.is_empty() {
        bail!("Competitor id must not be empty");
    }

    let club = match club_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(club_name) => Some(clubs::upsert_club(conn, club_name)?),
        None => None,
    };

    roster::upsert_roster_entry(conn, &normalized, name, club.as_ref().map(|c| c.id))?;
    info!(
        "Registered {} ({}){}",
        name,
        normalized,
        club.map(|c| format!(" in club {}", c.name)).unwrap_or_default()
    );
    Ok(normalized)
}
