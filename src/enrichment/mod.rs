//! Enrichment run: normalize, resolve through the cache, merge

pub mod merge;
pub mod normalize;
pub mod orchestrator;
pub mod stats;

pub use normalize::{normalize_artist_name, ArtistNormalizer, DefaultNormalizer};
pub use orchestrator::{Enricher, EnrichmentOutcome, ProgressFn};
pub use stats::{BpmStats, EnrichmentStats};
