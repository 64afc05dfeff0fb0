use anyhow::Result;
use colored::Colorize;

use crate::database::{self, settings, stats, DbPool, EntityKind, StandingRow, StatScope};

pub struct StandingsQuery {
    pub kind: EntityKind,
    pub lifetime: bool,
    pub season: Option<i64>,
    pub limit: usize,
}

pub struct StandingsService {
    pool: DbPool,
}

impl StandingsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn run(&self, query: &StandingsQuery) -> Result<()> {
        let conn = database::get_connection(&self.pool)?;
        let scope = if query.lifetime {
            StatScope::Lifetime
        } else {
            StatScope::Season(match query.season {
                Some(season) => {
                    settings::validate_season(season)?;
                    season
                }
                None => settings::get_current_season(&conn)?,
            })
        };

        let rows = stats::list_standings(&conn, query.kind, scope, query.limit)?;
        println!("{}", Self::title(query.kind, scope).bold());

        if rows.is_empty() {
            println!("{}", "  (no results yet)".dimmed());
            return Ok(());
        }

        for (idx, row) in rows.iter().enumerate() {
            println!("{}", format_row(idx + 1, row));
        }
        Ok(())
    }

    fn title(kind: EntityKind, scope: StatScope) -> String {
        let who = match kind {
            EntityKind::Club => "Club",
            EntityKind::Competitor => "Competitor",
        };
        match scope {
            StatScope::Lifetime => format!("{} standings (lifetime)", who),
            StatScope::Season(season) => format!("{} standings (season {})", who, season),
        }
    }
}

pub fn format_row(rank: usize, row: &StandingRow) -> String {
    let rank_label = format!("{:>3}.", rank);
    let rank_label = match rank {
        1 => rank_label.yellow().bold(),
        2 | 3 => rank_label.cyan(),
        _ => rank_label.normal(),
    };

    format!(
        "{} {:<24} {:>8} pts  {}/{}/{}",
        rank_label,
        row.display_name,
        row.total_points.normalize().to_string(),
        row.counts.first,
        row.counts.second,
        row.counts.third
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::PlacementCounts;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_row() {
        colored::control::set_override(false);
        let row = StandingRow {
            entity_id: "1".to_string(),
            display_name: "Club A".to_string(),
            total_points: dec!(12.30),
            counts: PlacementCounts {
                first: 2,
                second: 1,
                third: 0,
            },
        };

        let line = format_row(4, &row);
        assert!(line.starts_with("  4. Club A"));
        assert!(line.contains("12.3 pts"));
        assert!(line.ends_with("2/1/0"));
    }

    #[test]
    fn test_season_zero_is_not_read_as_lifetime() {
        let pool = database::create_memory_pool().unwrap();
        database::setup::ensure_schema(&database::get_connection(&pool).unwrap()).unwrap();
        let service = StandingsService::new(pool);

        for season in [0, -3] {
            let query = StandingsQuery {
                kind: EntityKind::Club,
                lifetime: false,
                season: Some(season),
                limit: 5,
            };
            assert!(service.run(&query).is_err());
        }

        let query = StandingsQuery {
            kind: EntityKind::Club,
            lifetime: false,
            season: Some(2),
            limit: 5,
        };
        assert!(service.run(&query).is_ok());
    }
}
