//! Provider answer types
//!
//! These are the shapes the orchestrator and the cache work with. Wire
//! formats live in `dto.rs` and are converted at the client boundary.

use serde::{Deserialize, Serialize};

/// Best artist match from a genre provider search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistMatch {
    /// Opaque provider identifier for the artist
    pub mbid: String,
    /// Artist name as the provider spells it
    pub name: String,
    /// Match score (0-100)
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
}

/// Genre tags for one artist
///
/// `genres` is ordered by vote count, highest first; `votes` is parallel to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistGenres {
    pub mbid: String,
    pub genres: Vec<String>,
    pub votes: Vec<u32>,
}

/// Tempo and key for one track
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackBpm {
    pub bpm: Option<f64>,
    pub key: Option<String>,
    pub time_signature: Option<String>,
}

impl TrackBpm {
    /// The all-empty answer a provider gives when it has no match
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this answer carries anything worth merging
    pub fn is_usable(&self) -> bool {
        self.bpm.is_some() || self.key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_bpm_usable() {
        assert!(!TrackBpm::empty().is_usable());
        assert!(TrackBpm {
            bpm: Some(120.0),
            ..Default::default()
        }
        .is_usable());
        assert!(TrackBpm {
            key: Some("Am".to_string()),
            ..Default::default()
        }
        .is_usable());
        // A time signature alone is not enough
        assert!(!TrackBpm {
            time_signature: Some("4/4".to_string()),
            ..Default::default()
        }
        .is_usable());
    }
}
