use serde::{Deserialize, Serialize};

/// Configuration for the title resolver and the batch pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Trailing region markers stripped by the region pass (matched as ` XX`).
    #[serde(default = "default_region_suffixes")]
    pub region_suffixes: Vec<String>,
    /// Leading articles stripped by the last pass.
    #[serde(default = "default_leading_articles")]
    pub leading_articles: Vec<String>,
    /// Word counts tried by the truncation pass, in order.
    /// Truncation only applies to titles longer than the largest count.
    #[serde(default = "default_truncation_lengths")]
    pub truncation_lengths: Vec<usize>,
    /// Delay between successive download records, in milliseconds.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            region_suffixes: default_region_suffixes(),
            leading_articles: default_leading_articles(),
            truncation_lengths: default_truncation_lengths(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

fn default_region_suffixes() -> Vec<String> {
    ["US", "UK", "AU", "CA", "NZ"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_leading_articles() -> Vec<String> {
    ["the", "a", "an"].into_iter().map(String::from).collect()
}

fn default_truncation_lengths() -> Vec<usize> {
    vec![3, 2]
}

fn default_pacing_ms() -> u64 {
    100
}
