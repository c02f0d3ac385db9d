//! Trait definitions for metadata providers.
//!
//! The orchestrator only sees these traits, so tests can substitute
//! scripted providers for the real HTTP clients.
//!
//! Two answer channels stay distinct: "definitively no match" is an `Ok`
//! value (`None` or an empty [`TrackBpm`]), "could not be determined" is an
//! `Err`.

use async_trait::async_trait;

use super::domain::{ArtistGenres, ArtistMatch, TrackBpm};
use super::errors::ProviderError;

/// Artist genre lookup (MusicBrainz in production)
#[async_trait]
pub trait GenreProvider: Send + Sync {
    /// Search for an artist by name; `Ok(None)` when nothing matches.
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistMatch>, ProviderError>;

    /// Fetch voted genre tags for a matched artist.
    async fn get_artist_genres(&self, mbid: &str) -> Result<ArtistGenres, ProviderError>;
}

/// Per-track tempo/key lookup (GetSongBPM in production)
#[async_trait]
pub trait BpmProvider: Send + Sync {
    /// Look up a track; an all-empty [`TrackBpm`] means no match.
    async fn lookup_track(&self, artist: &str, title: &str) -> Result<TrackBpm, ProviderError>;
}
