use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Content identifier parsing
///
/// Incoming requests carry an opaque content id. This module turns it into a
/// structured reference (kind, IMDB-style id, season, episode) without ever
/// failing: malformed input maps to `ContentKind::Unknown`, which downstream
/// logic treats as "cannot resolve".
/// Fixed IMDB-style id used for the dcool catalog source, which is not keyed
/// by IMDB ids of its own.
pub const DCOOL_IMDB_ID: &str = "tt5994346";

static SERIES_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tt(\d+):(\d+):(\d+)$").expect("series id regex"));

static DCOOL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^dcool-(.+)::(.+)-episode-(\d+)$").expect("dcool id regex"));

/// Kind of media item a content id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Single-file movie
    Movie,
    /// Episode of a series
    Series,
    /// Unrecognized input, cannot be resolved
    Unknown,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Movie => write!(f, "movie"),
            ContentKind::Series => write!(f, "series"),
            ContentKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(ContentKind::Movie),
            "series" => Ok(ContentKind::Series),
            "unknown" => Ok(ContentKind::Unknown),
            _ => Err(anyhow!("Invalid content kind: {}", s)),
        }
    }
}

/// Structured reference to a media item, immutable once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    /// What the id refers to
    pub kind: ContentKind,
    /// IMDB-style id, e.g. "tt1234567"
    pub imdb_id: String,
    /// Season number, 1 for movies, 0 when unknown
    pub season: u32,
    /// Episode number, 1 for movies, 0 when unknown
    pub episode: u32,
}

impl ContentRef {
    fn unknown() -> Self {
        ContentRef {
            kind: ContentKind::Unknown,
            imdb_id: String::new(),
            season: 0,
            episode: 0,
        }
    }

    /// Whether this reference can be resolved at all
    pub fn is_resolvable(&self) -> bool {
        self.kind != ContentKind::Unknown
    }
}

/// Parse an opaque content id into a [`ContentRef`].
///
/// Recognized grammars, in priority order:
/// - `tt<digits>:<season>:<episode>` - a series episode
/// - `tt<digits>` - a movie (season and episode default to 1)
/// - `dcool-<title>::<suffix>-episode-<n>` - the dcool catalog, remapped to
///   [`DCOOL_IMDB_ID`] with season 1
///
/// Anything else yields a structurally valid reference with
/// `ContentKind::Unknown` and zeroed season/episode. This function never
/// returns an error.
pub fn parse(id: &str) -> ContentRef {
    if let Some(caps) = SERIES_ID.captures(id) {
        let season = caps[2].parse().unwrap_or(0);
        let episode = caps[3].parse().unwrap_or(0);
        return ContentRef {
            kind: ContentKind::Series,
            imdb_id: format!("tt{}", &caps[1]),
            season,
            episode,
        };
    }

    if id.starts_with("tt") {
        // Bare title id with no season/episode marker is a single-file movie.
        return ContentRef {
            kind: ContentKind::Movie,
            imdb_id: id.split(':').next().unwrap_or(id).to_string(),
            season: 1,
            episode: 1,
        };
    }

    if let Some(caps) = DCOOL_ID.captures(id) {
        let episode = caps[3].parse().unwrap_or(0);
        return ContentRef {
            kind: ContentKind::Series,
            imdb_id: DCOOL_IMDB_ID.to_string(),
            season: 1,
            episode,
        };
    }

    ContentRef::unknown()
}
