//! Cache lookup results and TTL policy

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a positive answer stays valid
pub const FOUND_TTL_DAYS: i64 = 30;

/// How long a negative answer stays valid; shorter since "no match" may be a
/// gap on the provider side that gets filled later
pub const NOT_FOUND_TTL_DAYS: i64 = 7;

/// TTL for a row given its found flag
pub fn ttl_for(found: bool) -> Duration {
    if found {
        Duration::days(FOUND_TTL_DAYS)
    } else {
        Duration::days(NOT_FOUND_TTL_DAYS)
    }
}

/// Whether a row fetched at `fetched_at` is past its TTL at `now`
///
/// A row aged exactly its TTL is still valid.
pub fn is_expired(fetched_at: DateTime<Utc>, found: bool, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(fetched_at) > ttl_for(found)
}

/// Result of a cache read
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// Unexpired positive answer
    Found(T),
    /// Unexpired negative answer
    NotFound,
    /// No row, or the row is past its TTL
    Miss,
}

/// Row counts for one key space, expired rows included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total: u64,
    pub found: u64,
    pub not_found: u64,
}

/// One artist row, as listed by the admin view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedArtistRow {
    pub artist: String,
    pub mbid: Option<String>,
    pub genres: Vec<String>,
    pub found: bool,
    pub fetched_at: String,
}

/// Filter for listing cached artists
#[derive(Debug, Clone)]
pub struct ArtistListFilter {
    /// Case-insensitive genre substring; restricts to found rows
    pub genre: Option<String>,
    pub limit: usize,
}

impl Default for ArtistListFilter {
    fn default() -> Self {
        Self {
            genre: None,
            limit: 50,
        }
    }
}
