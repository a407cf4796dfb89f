//! Download history sources.

mod real_debrid;
mod types;

pub use real_debrid::{RealDebridClient, RealDebridConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching the download history.
#[derive(Debug, Error)]
pub enum DownloadSourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured or credentials rejected.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Provider of the ordered download history.
#[async_trait]
pub trait DownloadSource: Send + Sync {
    /// Fetch the download history, most recent first as the host orders it.
    async fn fetch_downloads(&self) -> Result<Vec<Download>, DownloadSourceError>;
}
