//! Metadata catalog integration.
//!
//! The resolver only talks to the [`MetadataCatalog`] trait; [`TmdbClient`]
//! is the production implementation.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the metadata catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A searchable movie/TV catalog with cross-references to external IDs.
///
/// Search results are returned in the catalog's own ranking order.
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// Search one media kind, optionally constrained to a release year.
    async fn search_by_kind(
        &self,
        kind: MediaKind,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<CatalogCandidate>, CatalogError>;

    /// Search all media kinds at once. Non-media hits are not returned.
    async fn search_multi(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError>;

    /// Look up the external ID of a catalog entry.
    ///
    /// `Ok(None)` means the entry has no usable cross-reference.
    async fn get_external_id(
        &self,
        catalog_id: u32,
        kind: MediaKind,
    ) -> Result<Option<ExternalId>, CatalogError>;
}
