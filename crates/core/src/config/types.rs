use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::TmdbConfig;
use crate::normalizer::NormalizerConfig;
use crate::resolver::ResolverConfig;
use crate::source::RealDebridConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub real_debrid: RealDebridConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Import file path. When unset a timestamped name in the working
    /// directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Where to dump the raw download history, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads_path: Option<PathBuf>,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub real_debrid: SanitizedRealDebridConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub resolver: ResolverConfig,
    pub output: OutputConfig,
}

/// Sanitized Real-Debrid config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRealDebridConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_token_configured: bool,
    pub limit: u32,
    pub timeout_secs: u32,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            real_debrid: SanitizedRealDebridConfig {
                base_url: config.real_debrid.base_url.clone(),
                api_token_configured: !config.real_debrid.api_token.is_empty(),
                limit: config.real_debrid.limit,
                timeout_secs: config.real_debrid.timeout_secs,
            },
            tmdb: SanitizedTmdbConfig {
                base_url: config.tmdb.base_url.clone(),
                api_key_configured: !config.tmdb.api_key.is_empty(),
                language: config.tmdb.language.clone(),
                timeout_secs: config.tmdb.timeout_secs,
            },
            resolver: config.resolver.clone(),
            output: config.output.clone(),
        }
    }
}
