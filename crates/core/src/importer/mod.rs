//! Batch import of a download history.
//!
//! Walks the history in order, normalizes each filename, resolves it and
//! collects a watch-history entry for every record that resolved. Records
//! that cannot be resolved are dropped; the batch itself never fails.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ExternalId;
use crate::normalizer::Normalizer;
use crate::resolver::TitleResolver;
use crate::source::Download;

/// One watch-history entry in the Trakt import shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraktEntry {
    pub imdb_id: ExternalId,
    pub watched_at: Option<String>,
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records seen.
    pub processed: usize,
    /// Records with an empty filename.
    pub skipped_empty: usize,
    /// Records whose normalized title was too short to look up.
    pub skipped_unusable: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Lookups served from the resolver cache.
    pub cache_hits: usize,
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct ImportOutput {
    pub entries: Vec<TraktEntry>,
    pub summary: ImportSummary,
}

/// Sequential history importer.
pub struct HistoryImporter {
    normalizer: Normalizer,
    resolver: TitleResolver,
    pacing: Duration,
}

impl HistoryImporter {
    /// `pacing` is slept between consecutive records that reached the resolver.
    pub fn new(normalizer: Normalizer, resolver: TitleResolver, pacing: Duration) -> Self {
        Self {
            normalizer,
            resolver,
            pacing,
        }
    }

    pub fn resolver(&self) -> &TitleResolver {
        &self.resolver
    }

    /// Resolve every record of `downloads`, in order.
    pub async fn resolve_all(&mut self, downloads: &[Download]) -> ImportOutput {
        let mut output = ImportOutput::default();
        let hits_before = self.resolver.cache_stats().hits;
        let mut looked_up_any = false;

        for (index, download) in downloads.iter().enumerate() {
            output.summary.processed += 1;

            if download.filename.trim().is_empty() {
                debug!("Skipping record {} ({}): empty filename", index, download.id);
                output.summary.skipped_empty += 1;
                continue;
            }

            let parsed = self.normalizer.normalize(&download.filename);
            if !parsed.is_usable() {
                info!(
                    "Skipping '{}': title '{}' is too short to look up",
                    download.filename, parsed.text
                );
                output.summary.skipped_unusable += 1;
                continue;
            }

            if looked_up_any && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            looked_up_any = true;

            match self.resolver.resolve_parsed(&parsed).await {
                Some(imdb_id) => {
                    info!(
                        "[{}/{}] '{}' ({:?}) -> {}",
                        index + 1,
                        downloads.len(),
                        parsed.text,
                        parsed.year,
                        imdb_id
                    );
                    output.summary.resolved += 1;
                    output.entries.push(TraktEntry {
                        imdb_id,
                        watched_at: download.generated.and_then(watched_at),
                    });
                }
                None => {
                    info!(
                        "[{}/{}] '{}' ({:?}) not found, skipping",
                        index + 1,
                        downloads.len(),
                        parsed.text,
                        parsed.year
                    );
                    output.summary.unresolved += 1;
                }
            }
        }

        output.summary.cache_hits = self.resolver.cache_stats().hits - hits_before;
        output
    }
}

/// Unix seconds as a UTC RFC 3339 timestamp, e.g. `2023-06-15T20:30:00Z`.
pub fn watched_at(unix_secs: i64) -> Option<String> {
    DateTime::from_timestamp(unix_secs, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
