//! Provider Error Types
//!
//! Structured error handling for metadata provider calls.
//! Maps HTTP status codes to specific error variants so the retry wrapper can
//! tell transient failures from permanent ones.
//!
//! A provider's "no match" answer is never one of these: it is a normal
//! return value (`None` or an all-empty record).

use crate::retry::Retryable;

/// Provider call error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({0}): {1}")]
    Server(u16, String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Unexpected response body: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Whether this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited
                | ProviderError::Timeout
                | ProviderError::Network(_)
                | ProviderError::Server(_, _)
        )
    }

    /// Create a ProviderError from an HTTP status code and response body
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ProviderError::Unauthorized(body.to_string()),
            404 => ProviderError::NotFound(body.to_string()),
            408 => ProviderError::Timeout,
            429 => ProviderError::RateLimited,
            500..=599 => ProviderError::Server(status, body.to_string()),
            _ => ProviderError::Request(format!("HTTP {}: {}", status, body)),
        }
    }
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        ProviderError::is_retryable(self)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::from_status(status.as_u16(), &err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}
