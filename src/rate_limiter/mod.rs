use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps a minimum spacing between feed requests
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(min_interval_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(ready_at) = self.next_allowed() {
            sleep_until(ready_at).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn next_allowed(&self) -> Option<Instant> {
        self.last_request.map(|last| last + self.min_interval)
    }
}
