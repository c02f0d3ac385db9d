//! Run statistics
//!
//! Created fresh for every run and handed back to the caller; never persisted.

use serde::Serialize;

/// Counters for one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentStats {
    /// Tracks in the input
    pub tracks: usize,
    /// Distinct canonical artist keys
    pub unique_artists: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Provider calls issued (a retried call counts once)
    pub api_calls: usize,
    pub not_found: usize,
    /// Keys left unresolved because the provider kept failing
    pub errors: usize,
    pub bpm: BpmStats,
}

/// Counters for the bpm gap-fill pass
///
/// A cache hit also counts toward `found` or `not_found`, by the cached row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmStats {
    /// Tracks that arrived without a bpm
    pub eligible: usize,
    pub cache_hits: usize,
    pub api_calls: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl EnrichmentStats {
    pub fn new(tracks: usize) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }
}
