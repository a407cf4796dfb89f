//! Filename normalizer.
//!
//! Turns a scene-style download filename such as
//! `The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv` into a searchable title
//! (`The Matrix`) and an optional release year (`1999`).
//!
//! Normalization is pure and total: malformed input degrades to an empty or
//! short title, it never fails. Callers decide whether the result is usable
//! with [`ParsedTitle::is_usable`].

mod config;

pub use config::NormalizerConfig;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Earliest year accepted as a release year.
pub const MIN_YEAR: u32 = 1900;
/// Latest year accepted as a release year.
pub const MAX_YEAR: u32 = 2099;

/// Titles shorter than this are too ambiguous to search for.
pub const MIN_TITLE_CHARS: usize = 3;

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\-]+").unwrap());

static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

static SXXEXX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS\d{1,2}E\d{1,2}\b").unwrap());

static NXNN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}x\d{1,2}\b").unwrap());

/// `www.site.com - ` or `www.site.co.uk-` before separators are replaced.
/// The dash is required; a dotted domain running straight into the title is
/// left alone.
static SITE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*www\.[a-z0-9]+(?:\.[a-z]{2,6}){1,2}\s*-\s*").unwrap());

/// Title and optional year extracted from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitle {
    pub text: String,
    pub year: Option<u32>,
}

impl ParsedTitle {
    /// Whether the title is long enough to be looked up.
    pub fn is_usable(&self) -> bool {
        self.text.trim().chars().count() >= MIN_TITLE_CHARS
    }
}

/// A set of case-insensitive word sequences.
#[derive(Debug, Clone)]
struct TokenSet {
    /// Lowercased phrases, longest first so `web dl` wins over `web`.
    phrases: Vec<Vec<String>>,
}

impl TokenSet {
    fn new(entries: &[String]) -> Self {
        let mut phrases: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| {
                SEPARATOR_RE
                    .replace_all(&entry.to_lowercase(), " ")
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()));
        phrases.dedup();
        Self { phrases }
    }

    /// Length in words of the phrase matching at `words[start..]`, if any.
    fn match_at(&self, words: &[&str], start: usize) -> Option<usize> {
        let rest = &words[start..];
        self.phrases
            .iter()
            .find(|phrase| {
                phrase.len() <= rest.len()
                    && phrase
                        .iter()
                        .zip(rest)
                        .all(|(p, w)| w.to_lowercase() == *p)
            })
            .map(|phrase| phrase.len())
    }
}

/// Deterministic filename → title normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    extensions: HashSet<String>,
    quality: TokenSet,
    source: TokenSet,
    codec: TokenSet,
    release_tags: TokenSet,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl Normalizer {
    /// Create a normalizer from token lists.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            quality: TokenSet::new(&config.quality_tokens),
            source: TokenSet::new(&config.source_tokens),
            codec: TokenSet::new(&config.codec_tokens),
            release_tags: TokenSet::new(&config.release_tags),
        }
    }

    /// Extract a cleaned title and optional year from a raw filename.
    pub fn normalize(&self, filename: &str) -> ParsedTitle {
        let (working, year) = extract_year(filename);
        // The prefix is anchored at the start, so removing it before the
        // separators are rewritten only changes how it is recognized.
        let working = SITE_PREFIX_RE.replace(&working, "");
        let working = SEPARATOR_RE.replace_all(&working, " ").into_owned();
        let working = self.strip_extension(&working);
        let working = BRACKETED_RE.replace_all(&working, " ");
        let working = SXXEXX_RE.replace_all(&working, " ");
        let working = NXNN_RE.replace_all(&working, " ");
        let working = self.strip_release_tokens(&working);
        let working = self.strip_release_tags(&working);

        let text = working
            .split_whitespace()
            .filter(|token| !is_orphan(token))
            .collect::<Vec<_>>()
            .join(" ");

        ParsedTitle { text, year }
    }

    /// Drop a trailing container extension token.
    fn strip_extension(&self, text: &str) -> String {
        let trimmed = text.trim_end();
        match trimmed.rsplit_once(char::is_whitespace) {
            Some((head, last)) if self.extensions.contains(&last.to_lowercase()) => {
                head.to_string()
            }
            None if self.extensions.contains(&trimmed.to_lowercase()) => String::new(),
            _ => text.to_string(),
        }
    }

    /// Remove quality, source and codec tokens.
    ///
    /// A quality token that follows some title text starts the release tail
    /// (`1080p BluRay x264 GROUP`), which is dropped whole. Without one, tokens
    /// are removed one by one and a final word right after a codec token is
    /// taken as the release group (`DVDRip XviD-GROUP`).
    fn strip_release_tokens(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut kept: Vec<&str> = Vec::with_capacity(words.len());
        let mut after_codec = false;
        let mut i = 0;

        while i < words.len() {
            if let Some(len) = self.quality.match_at(&words, i) {
                if !kept.is_empty() {
                    break;
                }
                i += len;
                after_codec = false;
                continue;
            }
            if let Some(len) = self.source.match_at(&words, i) {
                i += len;
                after_codec = false;
                continue;
            }
            if let Some(len) = self.codec.match_at(&words, i) {
                i += len;
                after_codec = true;
                continue;
            }
            if after_codec && i + 1 == words.len() {
                break;
            }
            kept.push(words[i]);
            after_codec = false;
            i += 1;
        }

        kept.join(" ")
    }

    /// Remove release-group and platform tags.
    fn strip_release_tags(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut kept: Vec<&str> = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            match self.release_tags.match_at(&words, i) {
                Some(len) => i += len,
                None => {
                    kept.push(words[i]);
                    i += 1;
                }
            }
        }

        kept.join(" ")
    }
}

/// Find the first 4-digit run in the year range and cut it out.
fn extract_year(filename: &str) -> (String, Option<u32>) {
    let found = DIGIT_RUN_RE.find_iter(filename).find_map(|m| {
        if m.as_str().len() != 4 {
            return None;
        }
        let year: u32 = m.as_str().parse().ok()?;
        (MIN_YEAR..=MAX_YEAR)
            .contains(&year)
            .then_some((m.range(), year))
    });

    match found {
        Some((range, year)) => {
            let mut working = filename.to_string();
            working.replace_range(range, "");
            (working, Some(year))
        }
        None => (filename.to_string(), None),
    }
}

/// Single characters and bare numbers left behind by stripped patterns.
fn is_orphan(token: &str) -> bool {
    token.chars().count() == 1 || token.chars().all(|c| c.is_ascii_digit())
}
