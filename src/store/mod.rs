pub mod sqlite;

use anyhow::Result;

use crate::domain::RosterIndex;
use crate::services::awards::AwardPlan;

pub use sqlite::SqliteStatsRepository;

/// What one applied plan changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub individual_awards: usize,
    pub club_awards: usize,
    pub skipped_club_awards: usize,
    pub clubs_refreshed: usize,
}

/// Persistence seam for the result pipeline
pub trait StatsRepository {
    fn current_season(&self) -> Result<i64>;

    /// Roster snapshot keyed by normalized competitor id
    fn load_roster(&self) -> Result<RosterIndex>;

    fn is_processed(&self, tournament_id: &str) -> Result<bool>;

    /// Apply every write of one tournament and its processed marker as a
    /// single unit. On error nothing is kept.
    fn apply_plan(&self, plan: &AwardPlan) -> Result<ApplySummary>;
}
