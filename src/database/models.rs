use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::scoring::Tier;

/// Whose stats a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Competitor,
    Club,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Competitor => "competitor",
            EntityKind::Club => "club",
        }
    }
}

/// Lifetime totals and per-season totals live side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatScope {
    Lifetime,
    Season(i64),
}

impl StatScope {
    pub fn key(&self) -> i64 {
        match self {
            StatScope::Lifetime => 0,
            StatScope::Season(season) => *season,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub member_points: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementCounts {
    pub first: i64,
    pub second: i64,
    pub third: i64,
}

#[derive(Debug, Clone)]
pub struct ProcessedTournament {
    pub tournament_id: String,
    pub name: Option<String>,
    pub tier: Tier,
    pub season: i64,
    pub processed_at: NaiveDateTime,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct StandingRow {
    pub entity_id: String,
    pub display_name: String,
    pub total_points: Decimal,
    pub counts: PlacementCounts,
}
