//! Retry with exponential backoff
//!
//! One combinator shared by every provider call site. Total attempts are
//! `1 + max_retries`; the delay before retry `k` (k >= 1) is
//! `base_delay * 2^(k-1)`, without jitter.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default delay before the first retry
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Errors that can tell whether another attempt might succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Bounded retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each one after
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry attempt `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}

/// Execute an operation with retry logic and exponential backoff
///
/// Non-retryable errors are returned immediately. The last error is returned
/// unchanged once the retry budget is spent.
///
/// # Arguments
/// * `policy` - Retry bound and base delay
/// * `label` - Human-readable description used in log lines
/// * `op` - Produces a fresh future for each attempt
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retryable() {
                    debug!(label = label, error = %e, "Not retrying permanent failure");
                    return Err(e);
                }
                if attempt >= policy.max_retries {
                    debug!(
                        label = label,
                        attempts = attempt + 1,
                        error = %e,
                        "Giving up after retries"
                    );
                    return Err(e);
                }

                attempt += 1;
                let delay = policy.delay_for(attempt);
                warn!(
                    label = label,
                    attempt = attempt,
                    max = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying provider call"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
