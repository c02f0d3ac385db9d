//! Curator Enrich - cache-aside metadata enrichment for a track library
//!
//! Reads a JSON array of tracks, enriches them with artist genres and
//! tempo data, and writes the enriched array back out.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use curator_enrich::cache::{ArtistListFilter, SqliteEnrichmentCache};
use curator_enrich::config::Config;
use curator_enrich::providers::{GetSongBpmClient, MusicBrainzClient};
use curator_enrich::{EnrichmentCache, Enricher, Track};

/// CLI command
#[derive(Debug, PartialEq)]
enum Command {
    /// Enrich a track file
    Enrich {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Show cache row counts
    CacheStats,
    /// List cached artists
    CacheList { filter: ArtistListFilterArgs },
    /// Delete every cache row
    CacheClear,
    /// Show help
    Help,
}

#[derive(Debug, PartialEq, Default)]
struct ArtistListFilterArgs {
    genre: Option<String>,
    limit: Option<usize>,
}

impl ArtistListFilterArgs {
    fn into_filter(self) -> ArtistListFilter {
        let defaults = ArtistListFilter::default();
        ArtistListFilter {
            genre: self.genre,
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

fn print_help() {
    eprintln!(
        r#"Curator Enrich - Add genres and tempo data to a track library

USAGE:
    curator-enrich enrich <tracks.json> [output.json]
    curator-enrich cache stats
    curator-enrich cache list [--genre <genre>] [--limit <n>]
    curator-enrich cache clear
    curator-enrich help

COMMANDS:
    enrich       Enrich tracks; writes to output.json or stdout
    cache stats  Show cached row counts
    cache list   List cached artists (default limit 50)
    cache clear  Delete all cached rows
    help         Show this help message

ENVIRONMENT:
    CURATOR_CONFIG_PATH  Config file (default: <config dir>/curator/enrich.toml)
    GETSONGBPM_API_KEY   Enables the bpm pass
    RUST_LOG             Log filter (trace, debug, info, warn, error)
"#
    );
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(command) = args.get(1) else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "enrich" => {
            let input = args
                .get(2)
                .ok_or_else(|| anyhow!("Usage: curator-enrich enrich <tracks.json> [output.json]"))?;
            Ok(Command::Enrich {
                input: PathBuf::from(input),
                output: args.get(3).map(PathBuf::from),
            })
        }
        "cache" => match args.get(2).map(String::as_str) {
            Some("stats") => Ok(Command::CacheStats),
            Some("clear") => Ok(Command::CacheClear),
            Some("list") => Ok(Command::CacheList {
                filter: parse_list_flags(&args[3..])?,
            }),
            _ => Err(anyhow!("Usage: curator-enrich cache <stats|list|clear>")),
        },
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(anyhow!("Unknown command: {}", other)),
    }
}

fn parse_list_flags(flags: &[String]) -> Result<ArtistListFilterArgs> {
    let mut parsed = ArtistListFilterArgs::default();
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| anyhow!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--genre" => parsed.genre = Some(value.clone()),
            "--limit" => {
                parsed.limit = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid --limit: {}", value))?,
                )
            }
            other => return Err(anyhow!("Unknown flag: {}", other)),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout may carry the enriched tracks
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let command = match parse_args(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    if command == Command::Help {
        print_help();
        return Ok(());
    }

    let config = Config::load()?;
    let cache = match SqliteEnrichmentCache::open(&config.database.path) {
        Ok(cache) => cache,
        Err(e) => {
            error!(path = %config.database.path.display(), error = %e, "Failed to open cache");
            return Err(e.into());
        }
    };

    match command {
        Command::Enrich { input, output } => run_enrich(&config, &cache, &input, output.as_deref()).await,
        Command::CacheStats => {
            let stats = serde_json::json!({
                "artists": cache.artist_stats()?,
                "bpm": cache.bpm_stats()?,
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::CacheList { filter } => {
            let rows = cache.list_artists(&filter.into_filter())?;
            if rows.is_empty() {
                eprintln!("No cached artists");
            }
            for row in rows {
                if row.found {
                    println!("{}\t{}\t{}", row.artist, row.genres.join(", "), row.fetched_at);
                } else {
                    println!("{}\t(not found)\t{}", row.artist, row.fetched_at);
                }
            }
            Ok(())
        }
        Command::CacheClear => {
            let removed = cache.clear()?;
            info!(removed, "Cleared enrichment cache");
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

async fn run_enrich(
    config: &Config,
    cache: &SqliteEnrichmentCache,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read tracks file: {:?}", input))?;
    let tracks: Vec<Track> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid tracks file: {:?}", input))?;
    info!(tracks = tracks.len(), path = %input.display(), "Loaded tracks");

    let musicbrainz = MusicBrainzClient::new(&config.musicbrainz)?;
    let getsongbpm = match config.getsongbpm_api_key() {
        Some(key) => Some(GetSongBpmClient::new(&config.getsongbpm, key)?),
        None => {
            warn!("No GetSongBPM API key configured, skipping bpm pass");
            None
        }
    };

    let mut enricher = Enricher::new(cache, &musicbrainz)
        .with_retry_policy(config.retry.policy())
        .with_progress(|done, total, artist| {
            info!(done, total, artist, "Fetching artist");
        });
    if let Some(client) = &getsongbpm {
        enricher = enricher.with_bpm_provider(client);
    }

    let outcome = enricher.enrich(&tracks).await;
    let json = serde_json::to_string_pretty(&outcome.tracks)?;

    match output {
        Some(path) => {
            write_atomic(path, json.as_bytes())?;
            info!(path = %path.display(), "Wrote enriched tracks");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    eprintln!("{}", serde_json::to_string_pretty(&outcome.stats)?);
    Ok(())
}

/// Write via a temp file in the same directory, then rename into place
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|e| anyhow!("Failed to write {:?}: {}", path, e.error))?;
    Ok(())
}
