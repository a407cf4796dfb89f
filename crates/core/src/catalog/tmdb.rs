//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{CatalogCandidate, ExternalId, MediaKind};
use super::{CatalogError, MetadataCatalog};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Result language (default: en-US).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let language = config
            .language
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            language,
        })
    }

    /// Build a search request with the shared query parameters.
    fn search_request(&self, endpoint: &str, query: &str) -> RequestBuilder {
        let url = format!("{}/search/{}", self.base_url, endpoint);
        self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("include_adult", "false"),
            ("language", self.language.as_str()),
        ])
    }

    /// Send a request and map TMDB status codes onto catalog errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, CatalogError> {
        let response = request.send().await?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }

    /// Search for movies by query.
    pub async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        debug!("TMDB movie search: query='{}', year={:?}", query, year);

        let mut request = self.search_request("movie", query);
        if let Some(y) = year {
            request = request.query(&[("year", &y.to_string())]);
        }

        let response = self.send(request, "movie search").await?;
        let search_result: TmdbSearchResponse<TmdbMovieResult> =
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse movie search response: {}", e))
            })?;

        Ok(search_result
            .results
            .into_iter()
            .enumerate()
            .map(|(rank, r)| r.into_candidate(rank))
            .collect())
    }

    /// Search for TV series by query.
    pub async fn search_tv(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        debug!("TMDB TV search: query='{}', year={:?}", query, year);

        let mut request = self.search_request("tv", query);
        if let Some(y) = year {
            request = request.query(&[("first_air_date_year", &y.to_string())]);
        }

        let response = self.send(request, "TV search").await?;
        let search_result: TmdbSearchResponse<TmdbTvResult> =
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse TV search response: {}", e))
            })?;

        Ok(search_result
            .results
            .into_iter()
            .enumerate()
            .map(|(rank, r)| r.into_candidate(rank))
            .collect())
    }

    /// Search movies and TV series together.
    pub async fn search_all(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
        debug!("TMDB multi search: query='{}'", query);

        let request = self.search_request("multi", query);
        let response = self.send(request, "multi search").await?;
        let search_result: TmdbSearchResponse<TmdbMultiResult> =
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse multi search response: {}", e))
            })?;

        Ok(multi_candidates(search_result.results))
    }

    /// Get the IMDb cross-reference of a movie or series.
    pub async fn external_ids(
        &self,
        tmdb_id: u32,
        kind: MediaKind,
    ) -> Result<Option<ExternalId>, CatalogError> {
        let url = format!(
            "{}/{}/{}/external_ids",
            self.base_url,
            kind.tmdb_segment(),
            tmdb_id
        );

        debug!("TMDB external ids: kind={}, id={}", kind, tmdb_id);

        let request = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())]);
        let response = self
            .send(request, &format!("{} ID {}", kind, tmdb_id))
            .await?;

        let ids: TmdbExternalIds = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse external ids response: {}", e))
        })?;

        Ok(ids.imdb_id.as_deref().and_then(ExternalId::normalize))
    }
}

#[async_trait]
impl MetadataCatalog for TmdbClient {
    async fn search_by_kind(
        &self,
        kind: MediaKind,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<CatalogCandidate>, CatalogError> {
        match kind {
            MediaKind::Movie => self.search_movies(query, year).await,
            MediaKind::Show => self.search_tv(query, year).await,
        }
    }

    async fn search_multi(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
        self.search_all(query).await
    }

    async fn get_external_id(
        &self,
        catalog_id: u32,
        kind: MediaKind,
    ) -> Result<Option<ExternalId>, CatalogError> {
        self.external_ids(catalog_id, kind).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    title: String,
}

#[derive(Debug, Deserialize)]
struct TmdbTvResult {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbMultiResult {
    id: u32,
    media_type: String,
    title: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbExternalIds {
    imdb_id: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl TmdbMovieResult {
    fn into_candidate(self, rank: usize) -> CatalogCandidate {
        CatalogCandidate {
            catalog_id: self.id,
            kind: MediaKind::Movie,
            title: self.title,
            rank,
        }
    }
}

impl TmdbTvResult {
    fn into_candidate(self, rank: usize) -> CatalogCandidate {
        CatalogCandidate {
            catalog_id: self.id,
            kind: MediaKind::Show,
            title: self.name,
            rank,
        }
    }
}

/// Keep movie and TV hits, re-ranked after people and collections are dropped.
fn multi_candidates(results: Vec<TmdbMultiResult>) -> Vec<CatalogCandidate> {
    results
        .into_iter()
        .filter_map(|r| {
            let kind = MediaKind::from_tmdb_media_type(&r.media_type)?;
            let title = r.title.or(r.name).unwrap_or_default();
            Some((r.id, kind, title))
        })
        .enumerate()
        .map(|(rank, (catalog_id, kind, title))| CatalogCandidate {
            catalog_id,
            kind,
            title,
            rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = TmdbClient::new(TmdbConfig {
            api_key: String::new(),
            base_url: None,
            language: None,
            timeout_secs: 30,
        });
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_movie_search_response_parsing() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"},
                {"id": 604, "title": "The Matrix Reloaded", "release_date": "2003-05-15"}
            ],
            "total_results": 2
        }"#;

        let parsed: TmdbSearchResponse<TmdbMovieResult> = serde_json::from_str(json).unwrap();
        let candidates: Vec<_> = parsed
            .results
            .into_iter()
            .enumerate()
            .map(|(rank, r)| r.into_candidate(rank))
            .collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].catalog_id, 603);
        assert_eq!(candidates[0].kind, MediaKind::Movie);
        assert_eq!(candidates[0].rank, 0);
        assert_eq!(candidates[1].title, "The Matrix Reloaded");
    }

    #[test]
    fn test_multi_search_drops_people() {
        let json = r#"{
            "results": [
                {"id": 6384, "media_type": "person", "name": "Keanu Reeves"},
                {"id": 1396, "media_type": "tv", "name": "Breaking Bad"},
                {"id": 603, "media_type": "movie", "title": "The Matrix"}
            ]
        }"#;

        let parsed: TmdbSearchResponse<TmdbMultiResult> = serde_json::from_str(json).unwrap();
        let candidates = multi_candidates(parsed.results);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, MediaKind::Show);
        assert_eq!(candidates[0].title, "Breaking Bad");
        assert_eq!(candidates[0].rank, 0);
        assert_eq!(candidates[1].kind, MediaKind::Movie);
        assert_eq!(candidates[1].rank, 1);
    }

    #[test]
    fn test_external_ids_parsing() {
        let with_id: TmdbExternalIds =
            serde_json::from_str(r#"{"id": 603, "imdb_id": "tt0133093"}"#).unwrap();
        assert_eq!(
            with_id.imdb_id.as_deref().and_then(ExternalId::normalize),
            ExternalId::parse("tt0133093")
        );

        let missing: TmdbExternalIds =
            serde_json::from_str(r#"{"id": 1, "imdb_id": null}"#).unwrap();
        assert!(missing.imdb_id.as_deref().and_then(ExternalId::normalize).is_none());

        let empty: TmdbExternalIds = serde_json::from_str(r#"{"id": 1, "imdb_id": ""}"#).unwrap();
        assert!(empty.imdb_id.as_deref().and_then(ExternalId::normalize).is_none());
    }

    #[test]
    fn test_empty_results_field_defaults() {
        let parsed: TmdbSearchResponse<TmdbTvResult> = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
