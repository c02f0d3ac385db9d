//! Curator enrichment
//!
//! Cache-aside enrichment of a track library with artist genres from
//! MusicBrainz and tempo/key data from GetSongBPM, backed by a durable
//! SQLite cache.

pub mod cache;
pub mod config;
pub mod enrichment;
pub mod providers;
pub mod retry;
pub mod track;

pub use cache::{CacheError, CacheLookup, CacheStats, EnrichmentCache, SqliteEnrichmentCache};
pub use config::Config;
pub use enrichment::{Enricher, EnrichmentOutcome, EnrichmentStats};
pub use providers::{BpmProvider, GenreProvider, ProviderError};
pub use retry::{with_retry, RetryPolicy, Retryable};
pub use track::{Enrichment, EnrichmentSource, Track};
