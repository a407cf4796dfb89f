//! Title resolver.
//!
//! Maps a normalized `(title, year)` to an external ID by walking the
//! fallback cascade against a [`MetadataCatalog`]. Every outcome, including
//! "not found", is memoized for the lifetime of the resolver.
//!
//! Catalog failures never escape: a failing call counts as "no candidate"
//! for that call and the cascade moves on. A title whose cascade ran into
//! failures is cached as unresolved like any other miss.

mod cascade;
mod config;

pub use cascade::{build_cascade, QueryVariant, Strategy};
pub use config::ResolverConfig;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{
    CandidateMatch, CatalogCandidate, CatalogError, ExternalId, MediaKind, MetadataCatalog,
};
use crate::normalizer::ParsedTitle;

/// Cache key, derived only from normalizer output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub title: String,
    pub year: Option<u32>,
}

impl CacheKey {
    pub fn new(title: &str, year: Option<u32>) -> Self {
        Self {
            title: title.to_string(),
            year,
        }
    }
}

/// Cache counters for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Resolves titles to external IDs, one run at a time.
///
/// The cache is owned exclusively by this instance; create a new resolver
/// for each run.
pub struct TitleResolver {
    catalog: Arc<dyn MetadataCatalog>,
    config: ResolverConfig,
    cache: HashMap<CacheKey, Option<ExternalId>>,
    stats: CacheStats,
}

impl TitleResolver {
    pub fn new(catalog: Arc<dyn MetadataCatalog>, config: ResolverConfig) -> Self {
        Self {
            catalog,
            config,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Resolve a normalized title.
    pub async fn resolve_parsed(&mut self, parsed: &ParsedTitle) -> Option<ExternalId> {
        self.resolve(&parsed.text, parsed.year).await
    }

    /// Resolve `title`/`year` to an external ID, consulting the cache first.
    pub async fn resolve(&mut self, title: &str, year: Option<u32>) -> Option<ExternalId> {
        let key = CacheKey::new(title, year);
        if let Some(cached) = self.cache.get(&key) {
            self.stats.hits += 1;
            debug!("Cache hit for '{}' ({:?}): {:?}", title, year, cached);
            return cached.clone();
        }
        self.stats.misses += 1;

        let result = match self.run_cascade(title, year).await {
            Some((external_id, strategy)) => {
                debug!(
                    "Resolved '{}' ({:?}) to {} via {} pass",
                    title, year, external_id, strategy
                );
                Some(external_id)
            }
            None => {
                debug!("No match for '{}' ({:?}) after all passes", title, year);
                None
            }
        };

        self.cache.insert(key, result.clone());
        result
    }

    /// Cached outcome for a key, if that key was resolved in this run.
    pub fn cached(&self, title: &str, year: Option<u32>) -> Option<&Option<ExternalId>> {
        self.cache.get(&CacheKey::new(title, year))
    }

    /// Number of cached keys (hits and negative hits).
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }

    async fn run_cascade(&self, title: &str, year: Option<u32>) -> Option<(ExternalId, Strategy)> {
        for variant in build_cascade(title, year, &self.config) {
            if let Some(external_id) = self.query_pass(&variant).await {
                if variant.strategy != Strategy::Exact {
                    info!(
                        "'{}' matched as '{}' ({:?}) by {} pass",
                        title, variant.title, variant.year, variant.strategy
                    );
                }
                return Some((external_id, variant.strategy));
            }
        }
        None
    }

    /// Movie search, show search, then multi-kind search for one variant.
    async fn query_pass(&self, variant: &QueryVariant) -> Option<ExternalId> {
        for kind in [MediaKind::Movie, MediaKind::Show] {
            let result = self
                .catalog
                .search_by_kind(kind, &variant.title, variant.year)
                .await;
            if let Some(external_id) = self.resolve_top(result, variant, kind).await {
                return Some(external_id);
            }
        }

        let result = self.catalog.search_multi(&variant.title).await;
        self.resolve_top(result, variant, "multi").await
    }

    /// Cross-reference the first-ranked candidate of a search, if any.
    async fn resolve_top(
        &self,
        result: Result<Vec<CatalogCandidate>, CatalogError>,
        variant: &QueryVariant,
        search: impl std::fmt::Display,
    ) -> Option<ExternalId> {
        let candidates = match result {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    "Catalog {} search failed for '{}' ({:?}): {}",
                    search, variant.title, variant.year, e
                );
                return None;
            }
        };

        let top = candidates.into_iter().min_by_key(|c| c.rank)?;
        let title = top.title.clone();
        let matched = self.cross_reference(top).await;
        if !matched.is_resolved() {
            debug!(
                "Top {} hit '{}' for '{}' has no external ID",
                matched.kind, title, variant.title
            );
        }
        matched.external_id
    }

    async fn cross_reference(&self, candidate: CatalogCandidate) -> CandidateMatch {
        let external_id = match self
            .catalog
            .get_external_id(candidate.catalog_id, candidate.kind)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "External ID lookup failed for {} {}: {}",
                    candidate.kind, candidate.catalog_id, e
                );
                None
            }
        };

        CandidateMatch {
            external_id,
            kind: candidate.kind,
            rank: candidate.rank,
        }
    }
}
