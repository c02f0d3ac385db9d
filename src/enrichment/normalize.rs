//! Artist name normalization
//!
//! Maps a display name to the canonical key used to group tracks for lookup.
//! Strips featured/collaborating artists so the lookup targets the primary
//! act:
//!
//! - "Daft Punk feat. Pharrell Williams" -> "Daft Punk"
//! - "KAYTRANADA, H.E.R." -> "KAYTRANADA"
//! - "Tyler, The Creator" -> "Tyler, The Creator"
//! - "Silk Sonic (Bruno Mars & Anderson .Paak)" -> "Silk Sonic"
//! - "Iron & Wine" -> "Iron & Wine"
//!
//! Case and diacritics are preserved.

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*\)\s*$").expect("valid regex"));

static COLLAB_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:feat\.?|ft\.?|featuring|with)\s+.*").expect("valid regex")
});

static BAND_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:the|a|an|los|la|le|les|das|die|der|his|her|jr|sr)\b").expect("valid regex")
});

/// Pure, deterministic display name -> canonical key mapping
pub trait ArtistNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

impl<F> ArtistNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, raw: &str) -> String {
        self(raw)
    }
}

/// The built-in normalizer, see [`normalize_artist_name`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl ArtistNormalizer for DefaultNormalizer {
    fn normalize(&self, raw: &str) -> String {
        normalize_artist_name(raw)
    }
}

/// Reduce a display name to its primary artist
pub fn normalize_artist_name(raw: &str) -> String {
    let name = TRAILING_PARENS.replace(raw, "");
    let name = COLLAB_SUFFIX.replace(&name, "");

    // "&" is deliberately left alone: "Simon & Garfunkel" is one act
    let name = match name.find(',') {
        Some(idx) if idx > 0 => {
            let after = name[idx + 1..].trim();
            if BAND_CONTINUATION.is_match(after) {
                &name[..]
            } else {
                &name[..idx]
            }
        }
        _ => &name[..],
    };

    name.trim().to_string()
}
