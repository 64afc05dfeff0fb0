use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;

use super::parsers;
use super::TournamentFeed;
use crate::config::settings::FeedSettings;
use crate::domain::{ParticipantRow, Tournament};
use crate::http::RateLimitedClient;

/// Tournament feed over HTTP
pub struct FeedClient {
    client: RateLimitedClient,
    base_url: String,
}

impl FeedClient {
    pub fn new(settings: &FeedSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            &settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            settings.api_key.clone(),
        )?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    // --- Helper Methods ---

    fn build_tournaments_url(&self) -> String {
        format!("{}/tournaments", self.base_url)
    }

    fn build_participants_url(&self, tournament_id: &str) -> String {
        format!(
            "{}/tournaments/{}/participants",
            self.base_url,
            urlencoding::encode(tournament_id)
        )
    }

    fn format_timestamp(ts: DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[async_trait]
impl TournamentFeed for FeedClient {
    async fn list_tournaments(
        &mut self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Tournament>> {
        let url = self.build_tournaments_url();
        info!("Fetching tournaments between {} and {}", since, until);

        let query = [
            ("since", Self::format_timestamp(since)),
            ("until", Self::format_timestamp(until)),
        ];
        let data = self.client.get_json(&url, &query).await?;
        parsers::parse_tournament_list(&data)
    }

    async fn list_participants(&mut self, tournament_id: &str) -> Result<Vec<ParticipantRow>> {
        let url = self.build_participants_url(tournament_id);
        let data = self.client.get_json(&url, &[]).await?;
        parsers::parse_participant_rows(&data)
    }
}
