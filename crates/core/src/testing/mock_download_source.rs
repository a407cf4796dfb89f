//! Mock download source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::source::{Download, DownloadSource, DownloadSourceError};

/// Mock implementation of the DownloadSource trait.
///
/// Returns a configurable history, or fails once when an error is injected.
#[derive(Debug, Clone, Default)]
pub struct MockDownloadSource {
    downloads: Arc<RwLock<Vec<Download>>>,
    next_error: Arc<RwLock<Option<DownloadSourceError>>>,
    fetch_count: Arc<RwLock<usize>>,
}

impl MockDownloadSource {
    /// Create a new mock source with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source returning the given history.
    pub fn with_downloads(downloads: Vec<Download>) -> Self {
        Self {
            downloads: Arc::new(RwLock::new(downloads)),
            ..Default::default()
        }
    }

    /// Replace the history.
    pub async fn set_downloads(&self, downloads: Vec<Download>) {
        *self.downloads.write().await = downloads;
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: DownloadSourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetch_count.read().await
    }
}

#[async_trait]
impl DownloadSource for MockDownloadSource {
    async fn fetch_downloads(&self) -> Result<Vec<Download>, DownloadSourceError> {
        *self.fetch_count.write().await += 1;

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.downloads.read().await.clone())
    }
}
