//! Track records
//!
//! The track shape handed in by the caller, plus the optional `enrichment`
//! sub-record this crate attaches.

use serde::{Deserialize, Serialize};

/// A track from the caller's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    /// Artist display name, possibly with featured artists
    pub artist: String,
    #[serde(default)]
    pub album: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub audio_features: AudioFeatures,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
    /// Caller fields this crate does not interpret, carried through as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Audio features supplied with the track
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub bpm: Option<f64>,
    pub key: Option<String>,
}

/// Where merged enrichment data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentSource {
    #[serde(rename = "musicbrainz")]
    MusicBrainz,
    #[serde(rename = "getsongbpm")]
    GetSongBpm,
}

/// Data merged onto a track by an enrichment run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_mbid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_genre_votes: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getsongbpm_bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getsongbpm_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getsongbpm_time_sig: Option<String>,
    /// RFC 3339 time of the run that produced this record
    pub enriched_at: String,
    /// Sources in merge order
    pub enrichment_sources: Vec<EnrichmentSource>,
}
