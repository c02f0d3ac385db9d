//! GetSongBPM API Client
//!
//! Tempo, key and time signature lookup by artist and title.
//! See: https://getsongbpm.com/api
//!
//! A lookup is two requests: a song search, then the details of the first
//! hit. Rate limits are undocumented; requests are spaced 500 ms apart by
//! default.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;

use super::domain::TrackBpm;
use super::dto::{SongDetailsResponse, SongSearchResponse};
use super::errors::ProviderError;
use super::throttle::RequestSpacer;
use super::traits::BpmProvider;
use crate::config::GetSongBpmConfig;

/// HTTP client timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("curator-enrich/", env!("CARGO_PKG_VERSION"));

/// GetSongBPM API client
pub struct GetSongBpmClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    spacer: RequestSpacer,
}

impl GetSongBpmClient {
    /// Create a client; `api_key` is required by every endpoint
    pub fn new(config: &GetSongBpmConfig, api_key: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            spacer: RequestSpacer::new(Duration::from_millis(config.rate_limit_ms)),
        })
    }

    /// Send a spaced GET request with the api key appended
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        self.spacer.wait().await;

        let mut query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        query.push(format!("api_key={}", urlencoding::encode(&self.api_key)));
        let url = format!("{}{}?{}", self.base_url, endpoint, query.join("&"));
        trace!(endpoint = endpoint, "GetSongBPM request");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(format!("{} ({})", e, endpoint)))
    }

    /// Id of the best matching song, if any
    pub async fn search_song(&self, artist: &str, title: &str) -> Result<Option<String>, ProviderError> {
        let lookup = format!("{} {}", title, artist);
        let response: SongSearchResponse = self
            .get_json("/search/", &[("type", "song"), ("lookup", &lookup)])
            .await?;
        Ok(response.first_hit().map(|hit| hit.id.clone()))
    }

    /// Tempo, key and time signature for a song id
    pub async fn song_details(&self, song_id: &str) -> Result<TrackBpm, ProviderError> {
        let response: SongDetailsResponse = self.get_json("/song/", &[("id", song_id)]).await?;
        Ok(match response.song {
            Some(song) => TrackBpm {
                bpm: song.tempo,
                key: song.key_of,
                time_signature: song.time_sig,
            },
            None => TrackBpm::empty(),
        })
    }
}

#[async_trait]
impl BpmProvider for GetSongBpmClient {
    async fn lookup_track(&self, artist: &str, title: &str) -> Result<TrackBpm, ProviderError> {
        match self.search_song(artist, title).await? {
            Some(song_id) => self.song_details(&song_id).await,
            None => Ok(TrackBpm::empty()),
        }
    }
}
