//! Minimum spacing between requests to one provider

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Keeps consecutive requests at least `min_interval` apart
pub struct RequestSpacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestSpacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the next request may be sent, then claim the slot
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
