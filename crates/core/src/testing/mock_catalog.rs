//! Mock metadata catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogCandidate, CatalogError, ExternalId, MediaKind, MetadataCatalog};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    SearchByKind {
        kind: MediaKind,
        query: String,
        year: Option<u32>,
    },
    SearchMulti {
        query: String,
    },
    GetExternalId {
        catalog_id: u32,
        kind: MediaKind,
    },
}

/// A title known to the mock catalog.
#[derive(Debug, Clone)]
pub struct MockTitle {
    pub catalog_id: u32,
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u32>,
    /// Raw cross-reference value, normalized like the real client does.
    pub external_id: Option<String>,
}

/// Mock implementation of the MetadataCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Titles are ranked in insertion order
/// - A search hits every title whose name contains the query (case-insensitive)
/// - Every call is recorded, including calls that fail
/// - One-shot or permanent failures can be injected
///
/// # Example
///
/// ```rust,ignore
/// use rewatch_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
/// catalog.add_title(fixtures::movie(603, "The Matrix", 1999, "tt0133093")).await;
///
/// let results = catalog.search_by_kind(MediaKind::Movie, "matrix", None).await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    titles: Arc<RwLock<Vec<MockTitle>>>,
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// If set, every operation fails.
    fail_all: Arc<RwLock<bool>>,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Add a title. Later titles rank below earlier ones.
    pub async fn add_title(&self, title: MockTitle) {
        self.titles.write().await.push(title);
    }

    /// Replace all titles.
    pub async fn set_titles(&self, titles: Vec<MockTitle>) {
        *self.titles.write().await = titles;
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every operation fail until switched off.
    pub async fn set_fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    async fn take_error(&self) -> Option<CatalogError> {
        if *self.fail_all.read().await {
            return Some(CatalogError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }

    async fn matching(
        &self,
        query: &str,
        accept: impl Fn(&MockTitle) -> bool,
    ) -> Vec<CatalogCandidate> {
        let query_lower = query.to_lowercase();
        self.titles
            .read()
            .await
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&query_lower) && accept(*t))
            .enumerate()
            .map(|(rank, t)| CatalogCandidate {
                catalog_id: t.catalog_id,
                kind: t.kind,
                title: t.title.clone(),
                rank,
            })
            .collect()
    }
}

#[async_trait]
impl MetadataCatalog for MockCatalog {
    async fn search_by_kind(
        &self,
        kind: MediaKind,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        self.record(RecordedCatalogQuery::SearchByKind {
            kind,
            query: query.to_string(),
            year,
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .matching(query, |t| {
                t.kind == kind && year.map_or(true, |y| t.year == Some(y))
            })
            .await)
    }

    async fn search_multi(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
        self.record(RecordedCatalogQuery::SearchMulti {
            query: query.to_string(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.matching(query, |_| true).await)
    }

    async fn get_external_id(
        &self,
        catalog_id: u32,
        kind: MediaKind,
    ) -> Result<Option<ExternalId>, CatalogError> {
        self.record(RecordedCatalogQuery::GetExternalId { catalog_id, kind })
            .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let titles = self.titles.read().await;
        let title = titles
            .iter()
            .find(|t| t.catalog_id == catalog_id && t.kind == kind)
            .ok_or_else(|| CatalogError::NotFound(format!("{} {} not found", kind, catalog_id)))?;

        Ok(title.external_id.as_deref().and_then(ExternalId::normalize))
    }
}
