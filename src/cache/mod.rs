//! Enrichment cache layer
//!
//! Durable cache-aside store for provider answers, keyed by canonical artist
//! name and by track id, with separate TTLs for matches and misses.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::CacheError;
pub use store::{EnrichmentCache, SqliteEnrichmentCache};
pub use types::{
    ArtistListFilter, CacheLookup, CacheStats, CachedArtistRow, FOUND_TTL_DAYS, NOT_FOUND_TTL_DAYS,
};
