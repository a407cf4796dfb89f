//! Token lists used by the filename normalizer.
//!
//! Every list can be replaced from the `[normalizer]` config section.
//! Entries are matched case-insensitively as whole words; entries containing
//! `.`, `_` or `-` match the word sequence they turn into once separators are
//! replaced by spaces (`web-dl` matches `web dl`).

use serde::{Deserialize, Serialize};

/// Configuration for the filename normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Container extensions stripped from the end of a filename.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Resolution and dynamic-range tokens.
    #[serde(default = "default_quality_tokens")]
    pub quality_tokens: Vec<String>,
    /// Release source tokens.
    #[serde(default = "default_source_tokens")]
    pub source_tokens: Vec<String>,
    /// Video codec and audio format tokens.
    #[serde(default = "default_codec_tokens")]
    pub codec_tokens: Vec<String>,
    /// Release groups, streaming platforms and release flags.
    #[serde(default = "default_release_tags")]
    pub release_tags: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            quality_tokens: default_quality_tokens(),
            source_tokens: default_source_tokens(),
            codec_tokens: default_codec_tokens(),
            release_tags: default_release_tags(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    strings(&["mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m4v"])
}

fn default_quality_tokens() -> Vec<String> {
    strings(&[
        "480p", "576p", "720p", "1080p", "1080i", "2160p", "4k", "uhd", "hdr", "hdr10", "sdr",
    ])
}

fn default_source_tokens() -> Vec<String> {
    strings(&[
        "web", "web-dl", "webdl", "webrip", "web-rip", "bluray", "blu-ray", "bdrip", "hdtv",
        "remux", "cam", "hdcam", "dvdrip", "hdrip", "brrip",
    ])
}

fn default_codec_tokens() -> Vec<String> {
    strings(&[
        "x264", "x265", "h264", "h265", "h.264", "h.265", "hevc", "avc", "av1", "xvid", "divx",
        "aac", "aac2", "ac3", "eac3", "dts", "truehd", "atmos", "flac", "opus", "vp9", "ddp",
        "ddp2", "ddp5", "dd+", "dd", "dd5", "10bit", "12bit",
    ])
}

/// Only tags that are not ordinary words; a tag matches anywhere in the title.
fn default_release_tags() -> Vec<String> {
    strings(&[
        // Release groups
        "yify", "yts", "rarbg", "ettv", "eztv", "etrg", "fgt", "ntb", "ntg", "cmrg", "ion10",
        "megusta", "galaxytv", "tgx", "qxr", "tigole", "pahe", "rartv",
        // Streaming platforms
        "amzn", "dsnp", "hmax", "atvp", "pcok", "pmtp",
        // Release flags
        "repack",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_documented_tokens() {
        let config = NormalizerConfig::default();
        for ext in ["mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m4v"] {
            assert!(config.extensions.iter().any(|e| e == ext), "{}", ext);
        }
        for token in ["1080p", "720p", "2160p", "4k", "hdr"] {
            assert!(config.quality_tokens.iter().any(|t| t == token), "{}", token);
        }
        for token in ["web-dl", "webrip", "bluray", "hdtv", "dvdrip", "brrip"] {
            assert!(config.source_tokens.iter().any(|t| t == token), "{}", token);
        }
        for token in ["x265", "hevc", "dd+", "10bit", "12bit"] {
            assert!(config.codec_tokens.iter().any(|t| t == token), "{}", token);
        }
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let toml = r#"
release_tags = ["mygroup"]
"#;
        let config: NormalizerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.release_tags, vec!["mygroup"]);
        assert_eq!(config.extensions, default_extensions());
        assert_eq!(config.codec_tokens, default_codec_tokens());
    }
}
