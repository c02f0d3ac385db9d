//! Enrichment Cache Implementation
//!
//! Durable cache of provider answers in SQLite, with a long TTL for matches
//! and a short one for "no match". Two key spaces share the same shape:
//! artist name -> genres, and track id -> tempo/key.
//!
//! Rows are only ever upserted here; nothing in the enrichment run deletes
//! them. `clear` exists for the operator binary.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, trace, warn};

use super::errors::CacheError;
use super::types::{is_expired, ArtistListFilter, CacheLookup, CacheStats, CachedArtistRow};
use crate::providers::{ArtistGenres, TrackBpm};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS enrichment_artists (
        artist_name TEXT PRIMARY KEY,
        mbid TEXT,
        genres_json TEXT,
        votes_json TEXT,
        found INTEGER NOT NULL DEFAULT 1,
        fetched_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_enrichment_artists_mbid ON enrichment_artists(mbid)",
    "CREATE TABLE IF NOT EXISTS enrichment_bpm (
        track_id INTEGER PRIMARY KEY,
        artist TEXT NOT NULL,
        title TEXT NOT NULL,
        bpm REAL,
        key TEXT,
        time_sig TEXT,
        found INTEGER NOT NULL DEFAULT 1,
        fetched_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_enrichment_bpm_artist_title ON enrichment_bpm(artist, title)",
];

/// Persistent store for provider answers
pub trait EnrichmentCache: Send + Sync {
    /// Cached genres for a canonical artist name
    fn get_artist(&self, name: &str) -> Result<CacheLookup<ArtistGenres>, CacheError>;

    /// Record a match, replacing any previous row
    fn set_artist(&self, name: &str, data: &ArtistGenres) -> Result<(), CacheError>;

    /// Record a definitive "no match", replacing any previous row
    fn set_artist_not_found(&self, name: &str) -> Result<(), CacheError>;

    /// Cached tempo/key for a track
    fn get_bpm(&self, track_id: i64) -> Result<CacheLookup<TrackBpm>, CacheError>;

    /// Record a usable tempo/key answer, replacing any previous row
    fn set_bpm(&self, track_id: i64, artist: &str, title: &str, data: &TrackBpm) -> Result<(), CacheError>;

    /// Record a definitive "no match" for a track, replacing any previous row
    fn set_bpm_not_found(&self, track_id: i64, artist: &str, title: &str) -> Result<(), CacheError>;

    /// Artist row counts, expired rows included
    fn artist_stats(&self) -> Result<CacheStats, CacheError>;

    /// Bpm row counts, expired rows included
    fn bpm_stats(&self) -> Result<CacheStats, CacheError>;
}

/// SQLite-backed enrichment cache
pub struct SqliteEnrichmentCache {
    conn: Mutex<Connection>,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Apply the TTL policy to a raw row
///
/// Unparseable timestamps count as expired so the row gets refetched.
fn classify<T>(
    key: &str,
    found: bool,
    fetched_at: &str,
    now: DateTime<Utc>,
    decode: impl FnOnce() -> Result<T, CacheError>,
) -> Result<CacheLookup<T>, CacheError> {
    let fetched = match DateTime::parse_from_rfc3339(fetched_at) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            warn!(key = key, fetched_at = fetched_at, error = %e, "Unreadable cache timestamp, treating as expired");
            return Ok(CacheLookup::Miss);
        }
    };

    if is_expired(fetched, found, now) {
        trace!(key = key, found = found, "Cache row expired");
        return Ok(CacheLookup::Miss);
    }

    if !found {
        return Ok(CacheLookup::NotFound);
    }

    decode().map(CacheLookup::Found)
}

fn parse_json_list<T: serde::de::DeserializeOwned>(key: &str, raw: Option<String>) -> Result<Vec<T>, CacheError> {
    match raw {
        None => Ok(Vec::new()),
        Some(json) => serde_json::from_str(&json).map_err(|e| CacheError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn to_json<T: serde::Serialize>(key: &str, value: &T) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|e| CacheError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn count_rows(conn: &Connection, table: &str) -> Result<CacheStats, CacheError> {
    let sql = format!(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN found = 1 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN found = 0 THEN 1 ELSE 0 END), 0)
         FROM {}",
        table
    );
    let (total, found, not_found): (i64, i64, i64) =
        conn.query_row(&sql, [], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?;
    Ok(CacheStats {
        total: total as u64,
        found: found as u64,
        not_found: not_found as u64,
    })
}

impl SqliteEnrichmentCache {
    /// Open (or create) the cache database at `path`
    ///
    /// Fails if the file cannot be opened or is not a usable SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| CacheError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let cache = Self::with_connection(conn)?;

        let artists = cache.artist_stats()?;
        let bpm = cache.bpm_stats()?;
        info!(
            path = %path.display(),
            artists = artists.total,
            bpm_rows = bpm.total,
            "Enrichment cache ready"
        );
        Ok(cache)
    }

    /// In-memory cache, gone when dropped
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory().map_err(|source| CacheError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, CacheError> {
        // Schema creation is the first statement that touches the file, so a
        // corrupt or foreign file surfaces here
        for stmt in SCHEMA {
            conn.execute_batch(stmt).map_err(CacheError::Schema)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Artist lookup as of `now`
    pub fn get_artist_at(&self, name: &str, now: DateTime<Utc>) -> Result<CacheLookup<ArtistGenres>, CacheError> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .prepare_cached(
                "SELECT mbid, genres_json, votes_json, found, fetched_at
                 FROM enrichment_artists WHERE artist_name = ?1",
            )?
            .query_row(params![name], |r| {
                Ok((
                    r.get::<_, Option<String>>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, Option<String>>(2)?,
                    r.get::<_, bool>(3)?,
                    r.get::<_, String>(4)?,
                ))
            })
            .optional()?;

        let Some((mbid, genres_json, votes_json, found, fetched_at)) = row else {
            trace!(artist = name, "Artist cache MISS (no row)");
            return Ok(CacheLookup::Miss);
        };

        classify(name, found, &fetched_at, now, || {
            Ok(ArtistGenres {
                mbid: mbid.unwrap_or_default(),
                genres: parse_json_list(name, genres_json)?,
                votes: parse_json_list(name, votes_json)?,
            })
        })
    }

    /// Upsert an artist row stamped `fetched_at`
    pub fn put_artist_at(
        &self,
        name: &str,
        data: Option<&ArtistGenres>,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let (mbid, genres_json, votes_json) = match data {
            Some(d) => (
                Some(d.mbid.clone()),
                Some(to_json(name, &d.genres)?),
                Some(to_json(name, &d.votes)?),
            ),
            None => (None, None, None),
        };

        let conn = self.conn.lock().unwrap();
        conn.prepare_cached(
            "INSERT INTO enrichment_artists (artist_name, mbid, genres_json, votes_json, found, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(artist_name) DO UPDATE SET
                mbid = excluded.mbid,
                genres_json = excluded.genres_json,
                votes_json = excluded.votes_json,
                found = excluded.found,
                fetched_at = excluded.fetched_at",
        )?
        .execute(params![
            name,
            mbid,
            genres_json,
            votes_json,
            data.is_some(),
            timestamp(fetched_at)
        ])?;

        debug!(artist = name, found = data.is_some(), "Cached artist");
        Ok(())
    }

    /// Bpm lookup as of `now`
    pub fn get_bpm_at(&self, track_id: i64, now: DateTime<Utc>) -> Result<CacheLookup<TrackBpm>, CacheError> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .prepare_cached(
                "SELECT bpm, key, time_sig, found, fetched_at
                 FROM enrichment_bpm WHERE track_id = ?1",
            )?
            .query_row(params![track_id], |r| {
                Ok((
                    r.get::<_, Option<f64>>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, Option<String>>(2)?,
                    r.get::<_, bool>(3)?,
                    r.get::<_, String>(4)?,
                ))
            })
            .optional()?;

        let Some((bpm, key, time_signature, found, fetched_at)) = row else {
            trace!(track_id = track_id, "Bpm cache MISS (no row)");
            return Ok(CacheLookup::Miss);
        };

        classify(&track_id.to_string(), found, &fetched_at, now, || {
            Ok(TrackBpm {
                bpm,
                key,
                time_signature,
            })
        })
    }

    /// Upsert a bpm row stamped `fetched_at`
    pub fn put_bpm_at(
        &self,
        track_id: i64,
        artist: &str,
        title: &str,
        data: Option<&TrackBpm>,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let empty = TrackBpm::empty();
        let values = data.unwrap_or(&empty);

        let conn = self.conn.lock().unwrap();
        conn.prepare_cached(
            "INSERT INTO enrichment_bpm (track_id, artist, title, bpm, key, time_sig, found, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(track_id) DO UPDATE SET
                artist = excluded.artist,
                title = excluded.title,
                bpm = excluded.bpm,
                key = excluded.key,
                time_sig = excluded.time_sig,
                found = excluded.found,
                fetched_at = excluded.fetched_at",
        )?
        .execute(params![
            track_id,
            artist,
            title,
            values.bpm,
            values.key,
            values.time_signature,
            data.is_some(),
            timestamp(fetched_at)
        ])?;

        debug!(track_id = track_id, found = data.is_some(), "Cached bpm");
        Ok(())
    }

    /// Cached artists ordered by name
    pub fn list_artists(&self, filter: &ArtistListFilter) -> Result<Vec<CachedArtistRow>, CacheError> {
        let conn = self.conn.lock().unwrap();
        let limit = filter.limit as i64;

        type RawRow = (String, Option<String>, Option<String>, bool, String);
        let map_row = |r: &rusqlite::Row<'_>| -> rusqlite::Result<RawRow> {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, Option<String>>(1)?,
                r.get::<_, Option<String>>(2)?,
                r.get::<_, bool>(3)?,
                r.get::<_, String>(4)?,
            ))
        };

        let raw = match &filter.genre {
            Some(genre) => {
                let pattern = format!("%{}%", genre.to_lowercase());
                let mut stmt = conn.prepare_cached(
                    "SELECT artist_name, mbid, genres_json, found, fetched_at
                     FROM enrichment_artists
                     WHERE found = 1 AND LOWER(genres_json) LIKE ?1
                     ORDER BY artist_name LIMIT ?2",
                )?;
                let rows = stmt.query_map(params![pattern, limit], map_row)?;
                let collected = rows.collect::<Result<Vec<_>, _>>()?;
                collected
            }
            None => {
                let mut stmt = conn.prepare_cached(
                    "SELECT artist_name, mbid, genres_json, found, fetched_at
                     FROM enrichment_artists
                     ORDER BY artist_name LIMIT ?1",
                )?;
                let rows = stmt.query_map(params![limit], map_row)?;
                let collected = rows.collect::<Result<Vec<_>, _>>()?;
                collected
            }
        };

        raw.into_iter()
            .map(|(artist, mbid, genres_json, found, fetched_at)| {
                let genres = parse_json_list(&artist, genres_json)?;
                Ok(CachedArtistRow {
                    artist,
                    mbid,
                    genres,
                    found,
                    fetched_at,
                })
            })
            .collect()
    }

    /// Delete every row from both key spaces
    ///
    /// Returns the number of rows removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let artists = tx.execute("DELETE FROM enrichment_artists", [])?;
        let bpm = tx.execute("DELETE FROM enrichment_bpm", [])?;
        tx.commit()?;

        info!(artists = artists, bpm_rows = bpm, "Cleared enrichment cache");
        Ok(artists + bpm)
    }
}

impl EnrichmentCache for SqliteEnrichmentCache {
    fn get_artist(&self, name: &str) -> Result<CacheLookup<ArtistGenres>, CacheError> {
        self.get_artist_at(name, Utc::now())
    }

    fn set_artist(&self, name: &str, data: &ArtistGenres) -> Result<(), CacheError> {
        self.put_artist_at(name, Some(data), Utc::now())
    }

    fn set_artist_not_found(&self, name: &str) -> Result<(), CacheError> {
        self.put_artist_at(name, None, Utc::now())
    }

    fn get_bpm(&self, track_id: i64) -> Result<CacheLookup<TrackBpm>, CacheError> {
        self.get_bpm_at(track_id, Utc::now())
    }

    fn set_bpm(&self, track_id: i64, artist: &str, title: &str, data: &TrackBpm) -> Result<(), CacheError> {
        self.put_bpm_at(track_id, artist, title, Some(data), Utc::now())
    }

    fn set_bpm_not_found(&self, track_id: i64, artist: &str, title: &str) -> Result<(), CacheError> {
        self.put_bpm_at(track_id, artist, title, None, Utc::now())
    }

    fn artist_stats(&self) -> Result<CacheStats, CacheError> {
        count_rows(&self.conn.lock().unwrap(), "enrichment_artists")
    }

    fn bpm_stats(&self) -> Result<CacheStats, CacheError> {
        count_rows(&self.conn.lock().unwrap(), "enrichment_bpm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn daft_punk() -> ArtistGenres {
        ArtistGenres {
            mbid: "m1".to_string(),
            genres: vec!["electronic".to_string(), "house".to_string()],
            votes: vec![34, 15],
        }
    }

    #[test]
    fn test_unknown_artist_is_miss() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        assert_eq!(cache.get_artist("Unknown Artist").unwrap(), CacheLookup::Miss);
    }

    #[test]
    fn test_set_then_get_artist() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist("Daft Punk", &daft_punk()).unwrap();

        assert_eq!(cache.get_artist("Daft Punk").unwrap(), CacheLookup::Found(daft_punk()));
    }

    #[test]
    fn test_not_found_round_trip() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist_not_found("Fake Artist").unwrap();
        assert_eq!(cache.get_artist("Fake Artist").unwrap(), CacheLookup::NotFound);
    }

    #[test]
    fn test_idempotent_read() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist("Daft Punk", &daft_punk()).unwrap();
        cache.set_artist_not_found("Fake Artist").unwrap();

        for key in ["Daft Punk", "Fake Artist", "Nobody"] {
            let first = cache.get_artist(key).unwrap();
            let second = cache.get_artist(key).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_upsert_overwrites() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let v1 = ArtistGenres {
            mbid: "mbid-v1".to_string(),
            genres: vec!["electronic".to_string()],
            votes: vec![5],
        };
        let v2 = ArtistGenres {
            mbid: "mbid-v1".to_string(),
            genres: vec!["electronic".to_string(), "downtempo".to_string(), "trip hop".to_string()],
            votes: vec![5, 3, 2],
        };
        cache.set_artist("Bonobo", &v1).unwrap();
        cache.set_artist("Bonobo", &v2).unwrap();

        assert_eq!(cache.get_artist("Bonobo").unwrap(), CacheLookup::Found(v2));
        assert_eq!(cache.artist_stats().unwrap().total, 1);
    }

    #[test]
    fn test_not_found_overwritten_by_match() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist_not_found("Daft Punk").unwrap();
        cache.set_artist("Daft Punk", &daft_punk()).unwrap();
        assert_eq!(cache.get_artist("Daft Punk").unwrap(), CacheLookup::Found(daft_punk()));
    }

    #[test]
    fn test_found_ttl_boundary() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let now = Utc::now();

        cache
            .put_artist_at("Old Hit", Some(&daft_punk()), now - Duration::days(30) - Duration::seconds(1))
            .unwrap();
        cache
            .put_artist_at("Recent Hit", Some(&daft_punk()), now - Duration::days(29))
            .unwrap();

        assert_eq!(cache.get_artist_at("Old Hit", now).unwrap(), CacheLookup::Miss);
        assert_eq!(
            cache.get_artist_at("Recent Hit", now).unwrap(),
            CacheLookup::Found(daft_punk())
        );
    }

    #[test]
    fn test_not_found_ttl_boundary() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let now = Utc::now();

        cache.put_artist_at("Old Miss", None, now - Duration::days(8)).unwrap();
        cache.put_artist_at("Recent Miss", None, now - Duration::days(6)).unwrap();

        assert_eq!(cache.get_artist_at("Old Miss", now).unwrap(), CacheLookup::Miss);
        assert_eq!(cache.get_artist_at("Recent Miss", now).unwrap(), CacheLookup::NotFound);
    }

    #[test]
    fn test_stats_include_expired_rows() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let long_ago = Utc::now() - Duration::days(365);

        cache.set_artist("A", &daft_punk()).unwrap();
        cache.set_artist("B", &daft_punk()).unwrap();
        cache.set_artist_not_found("C").unwrap();
        cache.put_artist_at("D", None, long_ago).unwrap();

        let stats = cache.artist_stats().unwrap();
        assert_eq!(
            stats,
            CacheStats {
                total: 4,
                found: 2,
                not_found: 2
            }
        );
        assert_eq!(cache.bpm_stats().unwrap(), CacheStats::default());
    }

    #[test]
    fn test_bpm_key_space() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let data = TrackBpm {
            bpm: Some(121.0),
            key: Some("Em".to_string()),
            time_signature: Some("4/4".to_string()),
        };

        assert_eq!(cache.get_bpm(42).unwrap(), CacheLookup::Miss);
        cache.set_bpm(42, "Daft Punk", "Around the World", &data).unwrap();
        cache.set_bpm_not_found(43, "Daft Punk", "Unreleased").unwrap();

        assert_eq!(cache.get_bpm(42).unwrap(), CacheLookup::Found(data));
        assert_eq!(cache.get_bpm(43).unwrap(), CacheLookup::NotFound);
        // Independent of the artist key space
        assert_eq!(cache.artist_stats().unwrap().total, 0);
        assert_eq!(
            cache.bpm_stats().unwrap(),
            CacheStats {
                total: 2,
                found: 1,
                not_found: 1
            }
        );
    }

    #[test]
    fn test_bpm_ttl() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        let now = Utc::now();
        cache
            .put_bpm_at(1, "A", "T", None, now - Duration::days(8))
            .unwrap();
        assert_eq!(cache.get_bpm_at(1, now).unwrap(), CacheLookup::Miss);
    }

    #[test]
    fn test_corrupt_payload_is_error() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache
            .conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO enrichment_artists VALUES ('Broken', 'm9', 'not json', '[]', 1, ?1)",
                params![timestamp(Utc::now())],
            )
            .unwrap();

        assert!(matches!(
            cache.get_artist("Broken"),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_is_miss() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache
            .conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO enrichment_artists VALUES ('Odd', 'm9', '[]', '[]', 1, 'yesterday')",
                [],
            )
            .unwrap();

        assert_eq!(cache.get_artist("Odd").unwrap(), CacheLookup::Miss);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("curator.db");

        {
            let cache = SqliteEnrichmentCache::open(&path).unwrap();
            cache.set_artist("Daft Punk", &daft_punk()).unwrap();
        }

        // Reopening runs the schema again without complaint
        let cache = SqliteEnrichmentCache::open(&path).unwrap();
        assert_eq!(cache.get_artist("Daft Punk").unwrap(), CacheLookup::Found(daft_punk()));
    }

    #[test]
    fn test_corrupt_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curator.db");
        std::fs::write(&path, vec![0x42u8; 4096]).unwrap();

        let err = SqliteEnrichmentCache::open(&path).err().unwrap();
        assert!(err.is_initialization());
    }

    #[test]
    fn test_list_artists_with_genre_filter() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist("Daft Punk", &daft_punk()).unwrap();
        cache
            .set_artist(
                "Bonobo",
                &ArtistGenres {
                    mbid: "b1".to_string(),
                    genres: vec!["Downtempo".to_string()],
                    votes: vec![3],
                },
            )
            .unwrap();
        cache.set_artist_not_found("House Of Nobody").unwrap();

        let all = cache.list_artists(&ArtistListFilter::default()).unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.artist.as_str()).collect();
        assert_eq!(names, vec!["Bonobo", "Daft Punk", "House Of Nobody"]);

        let house = cache
            .list_artists(&ArtistListFilter {
                genre: Some("HOUSE".to_string()),
                limit: 10,
            })
            .unwrap();
        assert_eq!(house.len(), 1);
        assert_eq!(house[0].artist, "Daft Punk");

        let limited = cache
            .list_artists(&ArtistListFilter { genre: None, limit: 1 })
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_clear_removes_both_key_spaces() {
        let cache = SqliteEnrichmentCache::open_in_memory().unwrap();
        cache.set_artist("Daft Punk", &daft_punk()).unwrap();
        cache.set_bpm_not_found(1, "Daft Punk", "X").unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get_artist("Daft Punk").unwrap(), CacheLookup::Miss);
        assert_eq!(cache.bpm_stats().unwrap().total, 0);
    }
}
