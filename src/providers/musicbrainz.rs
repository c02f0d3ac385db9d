//! MusicBrainz API Client
//!
//! Artist search and voted genre tags.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! MusicBrainz requires a User-Agent header and allows about one request per
//! second, so every request goes through a [`RequestSpacer`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

use super::domain::{ArtistGenres, ArtistMatch};
use super::dto::{ArtistGenresResponse, ArtistSearchResponse};
use super::errors::ProviderError;
use super::throttle::RequestSpacer;
use super::traits::GenreProvider;
use crate::config::MusicBrainzConfig;

/// HTTP client timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Search hits scoring below this are not trusted as a match
const MIN_MATCH_SCORE: u32 = 50;

/// Results requested per search
const SEARCH_LIMIT: u32 = 3;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: Client,
    base_url: String,
    spacer: RequestSpacer,
}

impl MusicBrainzClient {
    /// Create a client from configuration
    pub fn new(config: &MusicBrainzConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spacer: RequestSpacer::new(Duration::from_millis(config.rate_limit_ms)),
        })
    }

    /// Send a spaced GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        self.spacer.wait().await;

        let url = format!("{}{}", self.base_url, path);
        trace!(url = %url, "MusicBrainz request");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(format!("{} ({})", e, path)))
    }

    /// Phrase search for one exact name
    async fn search_artist_exact(&self, name: &str) -> Result<Option<ArtistMatch>, ProviderError> {
        // Quoting keeps Lucene syntax in names like "AC/DC" or "Fontaines D.C." literal
        let quoted = format!("\"{}\"", name.replace('"', ""));
        let path = format!(
            "/artist?query=artist:{}&fmt=json&limit={}",
            urlencoding::encode(&quoted),
            SEARCH_LIMIT
        );

        let response: ArtistSearchResponse = self.get_json(&path).await?;
        let best = match response.artists.into_iter().next() {
            Some(hit) if hit.score >= MIN_MATCH_SCORE => hit,
            _ => return Ok(None),
        };

        Ok(Some(ArtistMatch {
            mbid: best.id,
            name: best.name,
            score: best.score,
            disambiguation: best.disambiguation.filter(|d| !d.is_empty()),
        }))
    }
}

#[async_trait]
impl GenreProvider for MusicBrainzClient {
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistMatch>, ProviderError> {
        if let Some(found) = self.search_artist_exact(name).await? {
            return Ok(Some(found));
        }

        // "Gorillaz & Little Simz" -> "Gorillaz"
        if let Some(idx) = name.find(" & ") {
            let primary = name[..idx].trim();
            if !primary.is_empty() {
                debug!(artist = name, fallback = primary, "Retrying search with primary artist");
                return self.search_artist_exact(primary).await;
            }
        }

        Ok(None)
    }

    async fn get_artist_genres(&self, mbid: &str) -> Result<ArtistGenres, ProviderError> {
        let path = format!("/artist/{}?inc=genres&fmt=json", urlencoding::encode(mbid));
        let mut response: ArtistGenresResponse = self.get_json(&path).await?;

        // Stable sort keeps the provider's order among equal vote counts
        response.genres.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(ArtistGenres {
            mbid: mbid.to_string(),
            genres: response.genres.iter().map(|g| g.name.clone()).collect(),
            votes: response.genres.iter().map(|g| g.count).collect(),
        })
    }
}
