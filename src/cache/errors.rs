//! Cache store error types

use std::path::PathBuf;

/// Enrichment cache errors
///
/// `CreateDir`, `Open` and `Schema` can only come out of opening the store and
/// are fatal to a run. `Sqlite` and `Corrupt` are per-call failures.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open cache database {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Cache database is unusable: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Cache query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt cache row for {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

impl CacheError {
    /// Whether this error happened while opening the store
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            CacheError::CreateDir { .. } | CacheError::Open { .. } | CacheError::Schema(_)
        )
    }
}
