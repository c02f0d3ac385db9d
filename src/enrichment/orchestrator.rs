//! Enrichment orchestrator
//!
//! Cache-aside enrichment of a track list:
//!
//! 1. Canonicalize every track's artist and dedup keys in first-seen order
//! 2. Resolve each key from the cache, fetching misses one at a time
//! 3. For tracks without a bpm, do the same against the bpm provider
//! 4. Merge resolved data onto copies of the input tracks
//!
//! Provider failures are isolated per key: the key is counted as an error,
//! logged, left uncached, and the run carries on. Cache failures during a
//! run degrade to a miss (reads) or a lost write; the run still completes.

use std::collections::{HashMap, HashSet};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use super::merge::merge_track;
use super::normalize::{ArtistNormalizer, DefaultNormalizer};
use super::stats::{BpmStats, EnrichmentStats};
use crate::cache::{CacheLookup, EnrichmentCache};
use crate::providers::{ArtistGenres, BpmProvider, GenreProvider, ProviderError, TrackBpm};
use crate::retry::{with_retry, RetryPolicy};
use crate::track::Track;

/// Progress callback: `(processed, total_unique, artist_key)`
pub type ProgressFn<'a> = dyn Fn(usize, usize, &str) + Send + Sync + 'a;

/// Result of one enrichment run
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    /// Same length and order as the input
    pub tracks: Vec<Track>,
    pub stats: EnrichmentStats,
}

/// A resolved lookup. Unresolved keys are simply absent from the run's maps.
#[derive(Debug, Clone)]
enum Resolved<T> {
    Found(T),
    NotFound,
}

impl<T> Resolved<T> {
    fn found(&self) -> Option<&T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::NotFound => None,
        }
    }
}

/// Cache-aside enricher over a genre provider and an optional bpm provider
pub struct Enricher<'a> {
    cache: &'a dyn EnrichmentCache,
    genres: &'a dyn GenreProvider,
    bpm: Option<&'a dyn BpmProvider>,
    normalizer: Box<dyn ArtistNormalizer + 'a>,
    retry: RetryPolicy,
    on_progress: Option<Box<ProgressFn<'a>>>,
}

impl<'a> Enricher<'a> {
    pub fn new(cache: &'a dyn EnrichmentCache, genres: &'a dyn GenreProvider) -> Self {
        Self {
            cache,
            genres,
            bpm: None,
            normalizer: Box::new(DefaultNormalizer),
            retry: RetryPolicy::default(),
            on_progress: None,
        }
    }

    /// Enable the bpm gap-fill pass
    pub fn with_bpm_provider(mut self, provider: &'a dyn BpmProvider) -> Self {
        self.bpm = Some(provider);
        self
    }

    pub fn with_normalizer(mut self, normalizer: impl ArtistNormalizer + 'a) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Called before each artist fetch
    pub fn with_progress<F>(mut self, on_progress: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'a,
    {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    /// Enrich `tracks`, returning enriched copies and run statistics
    ///
    /// Never fails: unresolved lookups leave their tracks without the
    /// corresponding data and are counted in the stats.
    pub async fn enrich(&self, tracks: &[Track]) -> EnrichmentOutcome {
        let mut stats = EnrichmentStats::new(tracks.len());

        let keys: Vec<String> = tracks
            .iter()
            .map(|t| self.normalizer.normalize(&t.artist))
            .collect();
        let unique = first_seen_unique(&keys);
        stats.unique_artists = unique.len();

        let artists = self.resolve_artists(&unique, &mut stats).await;
        let bpm = match self.bpm {
            Some(provider) => self.resolve_bpm(provider, tracks, &mut stats.bpm).await,
            None => HashMap::new(),
        };

        let enriched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let tracks = tracks
            .iter()
            .zip(&keys)
            .map(|(track, key)| {
                merge_track(
                    track,
                    artists.get(key).and_then(Resolved::found),
                    bpm.get(&track.id).and_then(Resolved::found),
                    &enriched_at,
                )
            })
            .collect();

        info!(
            tracks = stats.tracks,
            unique_artists = stats.unique_artists,
            cache_hits = stats.cache_hits,
            api_calls = stats.api_calls,
            not_found = stats.not_found,
            errors = stats.errors,
            bpm_found = stats.bpm.found,
            bpm_errors = stats.bpm.errors,
            "Enrichment run complete"
        );

        EnrichmentOutcome { tracks, stats }
    }

    async fn resolve_artists(
        &self,
        unique: &[&str],
        stats: &mut EnrichmentStats,
    ) -> HashMap<String, Resolved<ArtistGenres>> {
        let mut resolved = HashMap::with_capacity(unique.len());
        let mut misses = Vec::new();

        for &key in unique {
            match self.cache.get_artist(key) {
                Ok(CacheLookup::Found(data)) => {
                    debug!(artist = key, "Artist cache HIT");
                    stats.cache_hits += 1;
                    resolved.insert(key.to_string(), Resolved::Found(data));
                }
                Ok(CacheLookup::NotFound) => {
                    debug!(artist = key, "Artist cache HIT (not found)");
                    stats.cache_hits += 1;
                    resolved.insert(key.to_string(), Resolved::NotFound);
                }
                Ok(CacheLookup::Miss) => misses.push(key),
                Err(e) => {
                    warn!(artist = key, error = %e, "Artist cache read failed, treating as miss");
                    misses.push(key);
                }
            }
        }
        stats.cache_misses = misses.len();

        for (i, &key) in misses.iter().enumerate() {
            if let Some(on_progress) = &self.on_progress {
                on_progress(stats.cache_hits + i + 1, unique.len(), key);
            }

            match self.fetch_artist(key, stats).await {
                Ok(Resolved::Found(data)) => {
                    if let Err(e) = self.cache.set_artist(key, &data) {
                        warn!(artist = key, error = %e, "Failed to cache artist genres");
                    }
                    resolved.insert(key.to_string(), Resolved::Found(data));
                }
                Ok(Resolved::NotFound) => {
                    stats.not_found += 1;
                    if let Err(e) = self.cache.set_artist_not_found(key) {
                        warn!(artist = key, error = %e, "Failed to cache artist miss");
                    }
                    resolved.insert(key.to_string(), Resolved::NotFound);
                }
                Err(e) => {
                    stats.errors += 1;
                    warn!(artist = key, error = %e, "Artist lookup failed");
                }
            }
        }

        resolved
    }

    /// Search then fetch genres for one artist key
    async fn fetch_artist(
        &self,
        key: &str,
        stats: &mut EnrichmentStats,
    ) -> Result<Resolved<ArtistGenres>, ProviderError> {
        stats.api_calls += 1;
        let label = format!("search \"{}\"", key);
        let Some(found) = with_retry(&self.retry, &label, || self.genres.search_artist(key)).await?
        else {
            return Ok(Resolved::NotFound);
        };

        stats.api_calls += 1;
        let label = format!("genres \"{}\"", key);
        let genres =
            with_retry(&self.retry, &label, || self.genres.get_artist_genres(&found.mbid)).await?;
        Ok(Resolved::Found(genres))
    }

    async fn resolve_bpm(
        &self,
        provider: &dyn BpmProvider,
        tracks: &[Track],
        stats: &mut BpmStats,
    ) -> HashMap<i64, Resolved<TrackBpm>> {
        let mut resolved = HashMap::new();

        for track in tracks.iter().filter(|t| t.audio_features.bpm.is_none()) {
            stats.eligible += 1;

            match self.cache.get_bpm(track.id) {
                Ok(CacheLookup::Found(data)) => {
                    stats.cache_hits += 1;
                    stats.found += 1;
                    resolved.insert(track.id, Resolved::Found(data));
                    continue;
                }
                Ok(CacheLookup::NotFound) => {
                    stats.cache_hits += 1;
                    stats.not_found += 1;
                    resolved.insert(track.id, Resolved::NotFound);
                    continue;
                }
                Ok(CacheLookup::Miss) => {}
                Err(e) => {
                    warn!(track_id = track.id, error = %e, "Bpm cache read failed, treating as miss");
                }
            }

            stats.api_calls += 1;
            let label = format!("bpm \"{} - {}\"", track.artist, track.title);
            let result = with_retry(&self.retry, &label, || {
                provider.lookup_track(&track.artist, &track.title)
            })
            .await;

            match result {
                Ok(data) if data.is_usable() => {
                    stats.found += 1;
                    if let Err(e) = self.cache.set_bpm(track.id, &track.artist, &track.title, &data) {
                        warn!(track_id = track.id, error = %e, "Failed to cache bpm");
                    }
                    resolved.insert(track.id, Resolved::Found(data));
                }
                Ok(_) => {
                    stats.not_found += 1;
                    if let Err(e) = self.cache.set_bpm_not_found(track.id, &track.artist, &track.title) {
                        warn!(track_id = track.id, error = %e, "Failed to cache bpm miss");
                    }
                    resolved.insert(track.id, Resolved::NotFound);
                }
                Err(e) => {
                    stats.errors += 1;
                    warn!(
                        track_id = track.id,
                        artist = %track.artist,
                        title = %track.title,
                        error = %e,
                        "Bpm lookup failed"
                    );
                }
            }
        }

        resolved
    }
}

/// Distinct keys in first-seen order
fn first_seen_unique(keys: &[String]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter()
        .map(String::as_str)
        .filter(|key| seen.insert(*key))
        .collect()
}
