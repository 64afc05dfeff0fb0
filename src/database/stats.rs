use std::str::FromStr;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::models::{EntityKind, PlacementCounts, StandingRow, StatScope};
use crate::scoring::{PlacementField, Tier};

/// Points are stored as exact decimal text
pub(crate) fn decimal_from_sql(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn get_total_points(
    conn: &Connection,
    kind: EntityKind,
    entity_id: &str,
    scope: StatScope,
) -> Result<Option<Decimal>> {
    let sql = "SELECT total_points FROM stat_totals WHERE entity_kind = ?1 AND entity_id = ?2 AND scope = ?3";

    conn.query_row(
        sql,
        params![kind.as_str(), entity_id, scope.key()],
        |row| decimal_from_sql(row, 0),
    )
    .optional()
    .with_context(|| format!("Failed to read total points for {} {}", kind.as_str(), entity_id))
}

/// Add points to one scope. The sum is computed in Rust so no float ever
/// touches the stored value.
pub fn add_points(
    conn: &Connection,
    kind: EntityKind,
    entity_id: &str,
    scope: StatScope,
    points: Decimal,
) -> Result<Decimal> {
    let current = get_total_points(conn, kind, entity_id, scope)?.unwrap_or(Decimal::ZERO);
    let updated = current + points;

    let sql = "INSERT INTO stat_totals (entity_kind, entity_id, scope, total_points) VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(entity_kind, entity_id, scope) DO UPDATE SET total_points = excluded.total_points";

    conn.execute(
        sql,
        params![kind.as_str(), entity_id, scope.key(), updated.to_string()],
    )
    .with_context(|| format!("Failed to add points for {} {}", kind.as_str(), entity_id))?;

    Ok(updated)
}

pub fn increment_placement(
    conn: &Connection,
    kind: EntityKind,
    entity_id: &str,
    scope: StatScope,
    tier: Tier,
    field: PlacementField,
) -> Result<()> {
    let insert_sql = "INSERT INTO tier_placements (entity_kind, entity_id, scope, tier) VALUES (?1, ?2, ?3, ?4)
                      ON CONFLICT(entity_kind, entity_id, scope, tier) DO NOTHING";
    let update_sql = format!(
        "UPDATE tier_placements SET {col} = {col} + 1 WHERE entity_kind = ?1 AND entity_id = ?2 AND scope = ?3 AND tier = ?4",
        col = field.column()
    );
    let (kind_key, scope_key, tier_key) = (kind.as_str(), scope.key(), tier.as_str());

    conn.execute(insert_sql, params![kind_key, entity_id, scope_key, tier_key])
        .and_then(|_| conn.execute(&update_sql, params![kind_key, entity_id, scope_key, tier_key]))
        .with_context(|| {
            format!(
                "Failed to increment {}.{} for {} {}",
                tier,
                field.column(),
                kind.as_str(),
                entity_id
            )
        })?;

    Ok(())
}

pub fn get_placement_counts(
    conn: &Connection,
    kind: EntityKind,
    entity_id: &str,
    scope: StatScope,
    tier: Tier,
) -> Result<PlacementCounts> {
    let sql = "SELECT first, second, third FROM tier_placements WHERE entity_kind = ?1 AND entity_id = ?2 AND scope = ?3 AND tier = ?4";

    let counts = conn
        .query_row(
            sql,
            params![kind.as_str(), entity_id, scope.key(), tier.as_str()],
            parse_counts,
        )
        .optional()
        .context("Failed to query placement counts")?;

    Ok(counts.unwrap_or_default())
}

fn parse_counts(row: &rusqlite::Row) -> rusqlite::Result<PlacementCounts> {
    Ok(PlacementCounts {
        first: row.get(0)?,
        second: row.get(1)?,
        third: row.get(2)?,
    })
}

/// Leaderboard for one entity kind and scope, highest points first.
/// Placement counts are summed across tiers.
pub fn list_standings(
    conn: &Connection,
    kind: EntityKind,
    scope: StatScope,
    limit: usize,
) -> Result<Vec<StandingRow>> {
    let name_source = match kind {
        EntityKind::Competitor => {
            "SELECT competitor_id AS id, COALESCE(name, competitor_id) AS name FROM competitors"
        }
        EntityKind::Club => "SELECT CAST(id AS TEXT) AS id, name FROM clubs",
    };
    let sql = format!(
        "SELECT s.entity_id, COALESCE(n.name, s.entity_id), s.total_points,
                COALESCE(SUM(p.first), 0), COALESCE(SUM(p.second), 0), COALESCE(SUM(p.third), 0)
         FROM stat_totals s
         LEFT JOIN ({name_source}) n ON n.id = s.entity_id
         LEFT JOIN tier_placements p
           ON p.entity_kind = s.entity_kind AND p.entity_id = s.entity_id AND p.scope = s.scope
         WHERE s.entity_kind = ?1 AND s.scope = ?2
         GROUP BY s.entity_id, n.name, s.total_points"
    );

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt
        .query_map(params![kind.as_str(), scope.key()], |row| {
            Ok(StandingRow {
                entity_id: row.get(0)?,
                display_name: row.get(1)?,
                total_points: decimal_from_sql(row, 2)?,
                counts: PlacementCounts {
                    first: row.get(3)?,
                    second: row.get(4)?,
                    third: row.get(5)?,
                },
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list standings")?;

    // Text-stored decimals cannot be ordered by SQLite
    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    rows.truncate(limit);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::ensure_schema;
    use rust_decimal_macros::dec;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_add_points_accumulates_exactly() {
        let conn = conn();
        for _ in 0..10 {
            add_points(&conn, EntityKind::Competitor, "A1", StatScope::Season(3), dec!(0.1)).unwrap();
        }

        let total = get_total_points(&conn, EntityKind::Competitor, "A1", StatScope::Season(3)).unwrap();
        assert_eq!(total, Some(dec!(1.0)));
        assert_eq!(
            get_total_points(&conn, EntityKind::Competitor, "A1", StatScope::Lifetime).unwrap(),
            None
        );
    }

    #[test]
    fn test_increment_placement_per_field() {
        let conn = conn();
        let scope = StatScope::Lifetime;
        increment_placement(&conn, EntityKind::Club, "1", scope, Tier::Gold, PlacementField::Third).unwrap();
        increment_placement(&conn, EntityKind::Club, "1", scope, Tier::Gold, PlacementField::Third).unwrap();
        increment_placement(&conn, EntityKind::Club, "1", scope, Tier::Gold, PlacementField::First).unwrap();

        let counts = get_placement_counts(&conn, EntityKind::Club, "1", scope, Tier::Gold).unwrap();
        assert_eq!(counts, PlacementCounts { first: 1, second: 0, third: 2 });
        assert_eq!(
            get_placement_counts(&conn, EntityKind::Club, "1", scope, Tier::Silver).unwrap(),
            PlacementCounts::default()
        );
    }

    #[test]
    fn test_list_standings_orders_by_decimal_points() {
        let conn = conn();
        let scope = StatScope::Season(1);
        add_points(&conn, EntityKind::Competitor, "LOW", scope, dec!(9.5)).unwrap();
        add_points(&conn, EntityKind::Competitor, "HIGH", scope, dec!(10.25)).unwrap();
        add_points(&conn, EntityKind::Competitor, "MID", scope, dec!(10)).unwrap();
        increment_placement(&conn, EntityKind::Competitor, "HIGH", scope, Tier::Gold, PlacementField::First).unwrap();
        increment_placement(&conn, EntityKind::Competitor, "HIGH", scope, Tier::Bronze, PlacementField::First).unwrap();

        let standings = list_standings(&conn, EntityKind::Competitor, scope, 2).unwrap();
        let ids: Vec<&str> = standings.iter().map(|s| s.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["HIGH", "MID"]);
        assert_eq!(standings[0].counts.first, 2);
        assert_eq!(standings[0].display_name, "HIGH");
    }
}
