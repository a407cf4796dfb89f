//! Real-Debrid REST API client.
//!
//! Only the downloads listing is used. Authentication is a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::Download;
use super::{DownloadSource, DownloadSourceError};

const DEFAULT_BASE_URL: &str = "https://api.real-debrid.com/rest/1.0";

/// Real-Debrid client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealDebridConfig {
    /// Real-Debrid API token (required).
    pub api_token: String,
    /// Base URL (default: https://api.real-debrid.com/rest/1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Maximum number of downloads requested (default: 1000).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_limit() -> u32 {
    1000
}

fn default_timeout() -> u32 {
    30
}

/// Real-Debrid API client.
pub struct RealDebridClient {
    client: Client,
    base_url: String,
    api_token: String,
    limit: u32,
}

impl RealDebridClient {
    /// Create a new Real-Debrid client.
    pub fn new(config: RealDebridConfig) -> Result<Self, DownloadSourceError> {
        if config.api_token.is_empty() {
            return Err(DownloadSourceError::NotConfigured(
                "Real-Debrid API token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token,
            limit: config.limit,
        })
    }
}

#[async_trait]
impl DownloadSource for RealDebridClient {
    async fn fetch_downloads(&self) -> Result<Vec<Download>, DownloadSourceError> {
        let url = format!("{}/downloads", self.base_url);

        info!("Fetching downloads from Real-Debrid (limit: {})", self.limit);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("limit", self.limit)])
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(DownloadSourceError::NotConfigured(
                "Real-Debrid rejected the API token".to_string(),
            ));
        }
        if status == 204 {
            debug!("Real-Debrid returned no content");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DownloadSourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let downloads = parse_downloads(&body)?;

        info!("Fetched {} downloads", downloads.len());
        Ok(downloads)
    }
}

/// Parse a downloads listing; an empty body is an empty history.
fn parse_downloads(body: &str) -> Result<Vec<Download>, DownloadSourceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(body).map_err(|e| {
        DownloadSourceError::ParseError(format!("Failed to parse downloads response: {}", e))
    })
}
