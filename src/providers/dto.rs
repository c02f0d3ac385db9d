//! Provider wire types
//!
//! Exact response shapes for the MusicBrainz and GetSongBPM JSON APIs.

use serde::{Deserialize, Deserializer};

/// Deserialize a number that might be encoded as a string, empty, or null.
/// GetSongBPM returns tempo as a string (e.g. "123.5") and sometimes as "".
fn deserialize_flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    struct FlexibleF64Visitor;

    impl<'de> de::Visitor<'de> for FlexibleF64Visitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, a string containing a number, or null")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Option<f64>, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Option<f64>, E> {
            Ok(Some(value as f64))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Option<f64>, E> {
            Ok(Some(value as f64))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<f64>, E> {
            // Unparseable tempo means "unknown", not a broken response
            Ok(value.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<f64>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<f64>, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(FlexibleF64Visitor)
}

/// Deserialize a string where "" means absent
fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// =========================================================================
// MusicBrainz
// =========================================================================

/// Response from /artist?query=...
#[derive(Debug, Deserialize)]
pub struct ArtistSearchResponse {
    #[serde(default)]
    pub artists: Vec<ArtistSearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistSearchHit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub disambiguation: Option<String>,
}

/// Response from /artist/<mbid>?inc=genres
#[derive(Debug, Deserialize)]
pub struct ArtistGenresResponse {
    #[serde(default)]
    pub genres: Vec<GenreTag>,
}

#[derive(Debug, Deserialize)]
pub struct GenreTag {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

// =========================================================================
// GetSongBPM
// =========================================================================

/// Response from /search/?type=song
///
/// With no hits the API answers `{"search": {"error": "no result"}}` instead
/// of an empty list.
#[derive(Debug, Deserialize)]
pub struct SongSearchResponse {
    #[serde(default)]
    pub search: Option<SongSearchField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SongSearchField {
    Hits(Vec<SongSearchHit>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
pub struct SongSearchHit {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl SongSearchResponse {
    /// First hit, if the search matched anything
    pub fn first_hit(&self) -> Option<&SongSearchHit> {
        match &self.search {
            Some(SongSearchField::Hits(hits)) => hits.first(),
            _ => None,
        }
    }
}

/// Response from /song/?id=...
#[derive(Debug, Deserialize)]
pub struct SongDetailsResponse {
    #[serde(default)]
    pub song: Option<SongDetails>,
}

#[derive(Debug, Deserialize)]
pub struct SongDetails {
    #[serde(default, deserialize_with = "deserialize_flexible_f64")]
    pub tempo: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub key_of: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub time_sig: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_search_deserialize() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 2,
            "artists": [
                {"id": "056e4f3e", "name": "Daft Punk", "score": 100, "disambiguation": "French duo"},
                {"id": "aa11", "name": "Daft Punk Tribute", "score": 61}
            ]
        }"#;
        let response: ArtistSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.artists.len(), 2);
        assert_eq!(response.artists[0].score, 100);
        assert_eq!(response.artists[0].disambiguation.as_deref(), Some("French duo"));
        assert!(response.artists[1].disambiguation.is_none());
    }

    #[test]
    fn test_artist_genres_missing_list() {
        let response: ArtistGenresResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(response.genres.is_empty());
    }

    #[test]
    fn test_song_search_no_result_shape() {
        let json = r#"{"search": {"error": "no result"}}"#;
        let response: SongSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_hit().is_none());
    }

    #[test]
    fn test_song_search_hits() {
        let json = r#"{"search": [{"id": "o2r0L", "title": "Around the World", "artist": {"name": "Daft Punk"}}]}"#;
        let response: SongSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_hit().map(|h| h.id.as_str()), Some("o2r0L"));
    }

    #[test]
    fn test_song_details_string_tempo() {
        let json = r#"{"song": {"id": "o2r0L", "tempo": "121", "key_of": "Em", "time_sig": "4/4"}}"#;
        let response: SongDetailsResponse = serde_json::from_str(json).unwrap();
        let song = response.song.unwrap();
        assert_eq!(song.tempo, Some(121.0));
        assert_eq!(song.key_of.as_deref(), Some("Em"));
        assert_eq!(song.time_sig.as_deref(), Some("4/4"));
    }

    #[test]
    fn test_song_details_empty_fields() {
        let json = r#"{"song": {"tempo": "", "key_of": "", "time_sig": null}}"#;
        let response: SongDetailsResponse = serde_json::from_str(json).unwrap();
        let song = response.song.unwrap();
        assert_eq!(song.tempo, None);
        assert_eq!(song.key_of, None);
        assert_eq!(song.time_sig, None);
    }
}
