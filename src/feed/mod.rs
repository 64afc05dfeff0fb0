pub mod client;
pub mod parsers;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ParticipantRow, Tournament};

pub use client::FeedClient;

/// Source of finished tournaments and their results. Empty lists are valid.
#[async_trait]
pub trait TournamentFeed: Send {
    /// Tournaments finished inside the window. Errors abort the whole run.
    async fn list_tournaments(
        &mut self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Tournament>>;

    /// Validated rows for one tournament; invalid rows are already dropped.
    async fn list_participants(&mut self, tournament_id: &str) -> Result<Vec<ParticipantRow>>;
}
