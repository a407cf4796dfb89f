//! Types shared by metadata catalog clients and the title resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Media category used to pick a catalog search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// TMDB path segment for this kind.
    pub fn tmdb_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }

    /// Parse a TMDB `media_type` value. Anything that is not a movie or a
    /// TV show (people, collections) yields `None`.
    pub fn from_tmdb_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Show),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

/// A ranked search hit as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCandidate {
    /// Catalog-internal ID (TMDB numeric ID).
    pub catalog_id: u32,
    /// Kind of the hit.
    pub kind: MediaKind,
    /// Display title (movie title or series name).
    pub title: String,
    /// 0-based position in the catalog's ranking.
    pub rank: usize,
}

/// A candidate after its cross-reference lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    pub external_id: Option<ExternalId>,
    pub kind: MediaKind,
    pub rank: usize,
}

impl CandidateMatch {
    pub fn is_resolved(&self) -> bool {
        self.external_id.is_some()
    }
}

/// Cross-referenced identifier in the `tt<digits>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    /// Accept a value that is already in `tt<digits>` form.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix("tt")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(value.to_string()))
    }

    /// Normalize a raw cross-reference value, adding the `tt` prefix when
    /// the source omitted it. Empty or malformed values yield `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with("tt") {
            Self::parse(trimmed)
        } else {
            Self::parse(&format!("tt{}", trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExternalId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid external id: {}", value))
    }
}

impl From<ExternalId> for String {
    fn from(id: ExternalId) -> Self {
        id.0
    }
}
