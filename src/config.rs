//! Configuration
//!
//! Optional TOML file; every key has a default so an empty or missing file
//! is a valid configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::retry::RetryPolicy;

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "CURATOR_CONFIG_PATH";

/// Overrides `getsongbpm.api_key`
pub const GETSONGBPM_API_KEY_ENV: &str = "GETSONGBPM_API_KEY";

const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2";
const DEFAULT_USER_AGENT: &str = "Curator/1.0 (curator@example.com)";
const DEFAULT_GETSONGBPM_URL: &str = "https://api.getsongbpm.com";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub musicbrainz: MusicBrainzConfig,
    pub getsongbpm: GetSongBpmConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file holding the enrichment cache
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("curator")
                .join("curator.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MusicBrainzConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Minimum gap between requests
    pub rate_limit_ms: u64,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MUSICBRAINZ_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit_ms: 1100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GetSongBpmConfig {
    pub base_url: String,
    /// Without a key the bpm pass is skipped
    pub api_key: Option<String>,
    pub rate_limit_ms: u64,
}

impl Default for GetSongBpmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GETSONGBPM_URL.to_string(),
            api_key: None,
            rate_limit_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            base_delay_ms: policy.base_delay.as_millis() as u64,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.base_delay_ms))
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("curator")
            .join("enrich.toml")
    }

    /// Load from `$CURATOR_CONFIG_PATH` or the default location, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(|p| expand_home(&p))
            .unwrap_or_else(|_| Self::default_path());

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Ok(key) = std::env::var(GETSONGBPM_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.getsongbpm.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::parse(&raw).with_context(|| format!("Invalid config file: {:?}", path))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse TOML text
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(raw)?;
        config.database.path = expand_home(&config.database.path.to_string_lossy());
        Ok(config)
    }

    /// The GetSongBPM key, if one is configured and non-empty
    pub fn getsongbpm_api_key(&self) -> Option<&str> {
        self.getsongbpm
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
