//! Merge resolved lookups back onto tracks

use crate::providers::{ArtistGenres, TrackBpm};
use crate::track::{Enrichment, EnrichmentSource, Track};

/// Copy `track`, attaching whatever usable data was resolved for it
///
/// With nothing usable the copy is identical to the input.
pub fn merge_track(
    track: &Track,
    artist: Option<&ArtistGenres>,
    bpm: Option<&TrackBpm>,
    enriched_at: &str,
) -> Track {
    let bpm = bpm.filter(|b| b.is_usable());
    if artist.is_none() && bpm.is_none() {
        return track.clone();
    }

    let mut enrichment = Enrichment {
        enriched_at: enriched_at.to_string(),
        ..Default::default()
    };

    if let Some(artist) = artist {
        enrichment.artist_mbid = Some(artist.mbid.clone());
        enrichment.artist_genres = Some(artist.genres.clone());
        enrichment.artist_genre_votes = Some(artist.votes.clone());
        enrichment.enrichment_sources.push(EnrichmentSource::MusicBrainz);
    }

    if let Some(bpm) = bpm {
        enrichment.getsongbpm_bpm = bpm.bpm;
        enrichment.getsongbpm_key = bpm.key.clone();
        enrichment.getsongbpm_time_sig = bpm.time_signature.clone();
        enrichment.enrichment_sources.push(EnrichmentSource::GetSongBpm);
    }

    Track {
        enrichment: Some(enrichment),
        ..track.clone()
    }
}
