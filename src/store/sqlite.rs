use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, warn};
use rusqlite::Connection;

use super::{ApplySummary, StatsRepository};
use crate::database::{self, clubs, competitors, markers, roster, settings, stats, DbPool};
use crate::database::{EntityKind, StatScope};
use crate::domain::RosterIndex;
use crate::errors::store_context;
use crate::services::awards::{AwardPlan, ClubAward, IndividualAward};

pub struct SqliteStatsRepository {
    pool: DbPool,
}

impl SqliteStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl StatsRepository for SqliteStatsRepository {
    fn current_season(&self) -> Result<i64> {
        let conn = database::get_connection(&self.pool)?;
        settings::get_current_season(&conn)
    }

    fn load_roster(&self) -> Result<RosterIndex> {
        let conn = database::get_connection(&self.pool)?;
        roster::load_roster(&conn)
    }

    fn is_processed(&self, tournament_id: &str) -> Result<bool> {
        let conn = database::get_connection(&self.pool)?;
        markers::is_processed(&conn, tournament_id)
    }

    fn apply_plan(&self, plan: &AwardPlan) -> Result<ApplySummary> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction()
            .with_context(|| store_context("begin", &plan.tournament.id))?;

        let summary = write_plan(&tx, plan)?;

        tx.commit()
            .with_context(|| store_context("commit", &plan.tournament.id))?;
        Ok(summary)
    }
}

fn write_plan(conn: &Connection, plan: &AwardPlan) -> Result<ApplySummary> {
    let tournament_id = plan.tournament.id.as_str();
    if let Some(existing) = markers::find_processed(conn, tournament_id)? {
        bail!(
            "Tournament {} was already recorded as {} in season {} at {}",
            tournament_id,
            existing.tier,
            existing.season,
            existing.processed_at
        );
    }

    let scopes = [StatScope::Lifetime, StatScope::Season(plan.season)];
    let mut summary = ApplySummary::default();
    let mut touched_clubs = BTreeSet::new();

    for award in &plan.individual {
        write_individual(conn, plan, award, &scopes)?;
        touched_clubs.extend(award.club_id);
        summary.individual_awards += 1;
    }

    for award in &plan.clubs {
        if write_club(conn, plan, award, &scopes)? {
            touched_clubs.insert(award.club.id);
            summary.club_awards += 1;
        } else {
            summary.skipped_club_awards += 1;
        }
    }

    for club_id in touched_clubs {
        let Some(club) = clubs::find_by_id(conn, club_id)? else {
            continue;
        };
        if clubs::refresh_member_points(conn, &club)? {
            summary.clubs_refreshed += 1;
        }
    }

    markers::mark_processed(
        conn,
        tournament_id,
        plan.tournament.name.as_deref(),
        plan.tier.as_str(),
        plan.season,
        Utc::now().naive_utc(),
    )?;

    for entry in &plan.podium {
        markers::insert_podium_entry(
            conn,
            tournament_id,
            entry.position,
            &entry.party_id,
            entry.placement,
            &entry.competitor_ids,
        )?;
    }

    Ok(summary)
}

fn write_individual(
    conn: &Connection,
    plan: &AwardPlan,
    award: &IndividualAward,
    scopes: &[StatScope],
) -> Result<()> {
    competitors::upsert_competitor(
        conn,
        &award.competitor_id,
        award.name.as_deref(),
        award.registered,
        award.club_id,
    )?;

    for &scope in scopes {
        if let Some(field) = award.field {
            stats::increment_placement(conn, EntityKind::Competitor, &award.competitor_id, scope, plan.tier, field)?;
        }
        if !award.points.is_zero() {
            stats::add_points(conn, EntityKind::Competitor, &award.competitor_id, scope, award.points)?;
        }
    }

    Ok(())
}

/// Returns false when the club has no record to write to.
fn write_club(
    conn: &Connection,
    plan: &AwardPlan,
    award: &ClubAward,
    scopes: &[StatScope],
) -> Result<bool> {
    if clubs::find_by_id(conn, award.club.id)?.is_none() {
        warn!(
            "Club {} ({}) not found, skipping club award for tournament {}",
            award.club.name, award.club.id, plan.tournament.id
        );
        return Ok(false);
    }

    let club_key = award.club.id.to_string();
    for &scope in scopes {
        stats::increment_placement(conn, EntityKind::Club, &club_key, scope, plan.tier, award.field)?;
        stats::add_points(conn, EntityKind::Club, &club_key, scope, award.points)?;
    }

    debug!(
        "Credited club {} with {} for placement {} in {}",
        award.club.name, award.points, award.placement, plan.tournament.id
    );
    Ok(true)
}
