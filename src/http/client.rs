use crate::errors::fetch_context;
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client with built-in rate limiting and optional bearer auth
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    api_key: Option<String>,
}

impl RateLimitedClient {
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            api_key,
        })
    }

    /// GET a JSON document; non-2xx statuses are errors.
    pub async fn get_json(&mut self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.rate_limiter.wait().await;

        let response = self.send_get_request(url, query).await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{}: status {}", fetch_context(url), status);
        }

        response
            .json::<Value>()
            .await
            .with_context(|| fetch_context(url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        request
            .send()
            .await
            .with_context(|| fetch_context(url))
    }
}
