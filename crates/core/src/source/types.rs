//! Download history records.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the download history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    /// Host-assigned download ID.
    #[serde(default)]
    pub id: String,
    /// Filename as recorded by the host.
    #[serde(default)]
    pub filename: String,
    /// Size in bytes.
    #[serde(default, alias = "filesize")]
    pub bytes: u64,
    /// Host-reported status (may be empty).
    #[serde(default)]
    pub status: String,
    /// When the download link was generated, as unix seconds.
    /// Accepts a unix timestamp or an RFC 3339 string on the wire.
    #[serde(
        default,
        deserialize_with = "deserialize_generated",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Unix(i64),
    Text(String),
}

fn deserialize_generated<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Unix(secs)) => Some(secs),
        Some(RawTimestamp::Text(text)) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|dt| dt.timestamp()),
        None => None,
    })
}

/// Summary of a download history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadStats {
    pub total_downloads: usize,
    pub total_bytes: u64,
    /// Download count per status; an empty status counts as `unknown`.
    pub status_counts: BTreeMap<String, usize>,
}

impl DownloadStats {
    pub fn from_downloads(downloads: &[Download]) -> Self {
        let mut stats = Self {
            total_downloads: downloads.len(),
            ..Default::default()
        };

        for download in downloads {
            stats.total_bytes += download.bytes;
            let status = if download.status.is_empty() {
                "unknown"
            } else {
                download.status.as_str()
            };
            *stats.status_counts.entry(status.to_string()).or_insert(0) += 1;
        }

        stats
    }

    /// Total size in GiB.
    pub fn total_gib(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_real_debrid_shape() {
        let json = r#"{
            "id": "ABCDEF123",
            "filename": "The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv",
            "mimeType": "video/x-matroska",
            "filesize": 8589934592,
            "link": "https://example.com/d/ABCDEF123",
            "host": "example.com",
            "chunks": 16,
            "download": "https://download.example.com/ABCDEF123",
            "generated": "2023-06-15T20:30:00.000Z"
        }"#;

        let download: Download = serde_json::from_str(json).unwrap();
        assert_eq!(download.id, "ABCDEF123");
        assert_eq!(download.bytes, 8_589_934_592);
        assert_eq!(download.status, "");
        assert_eq!(download.generated, Some(1_686_861_000));
    }

    #[test]
    fn test_deserialize_unix_generated() {
        let json = r#"{"filename": "a.mkv", "bytes": 10, "status": "downloaded", "generated": 1700000000}"#;
        let download: Download = serde_json::from_str(json).unwrap();
        assert_eq!(download.generated, Some(1_700_000_000));
        assert_eq!(download.status, "downloaded");
    }

    #[test]
    fn test_deserialize_missing_or_bad_generated() {
        let download: Download = serde_json::from_str(r#"{"filename": "a.mkv"}"#).unwrap();
        assert_eq!(download.generated, None);

        let download: Download =
            serde_json::from_str(r#"{"filename": "a.mkv", "generated": null}"#).unwrap();
        assert_eq!(download.generated, None);

        let download: Download =
            serde_json::from_str(r#"{"filename": "a.mkv", "generated": "yesterday"}"#).unwrap();
        assert_eq!(download.generated, None);
    }

    #[test]
    fn test_stats() {
        let downloads = vec![
            Download {
                id: "1".to_string(),
                filename: "a.mkv".to_string(),
                bytes: 1024 * 1024 * 1024,
                status: "downloaded".to_string(),
                generated: None,
            },
            Download {
                id: "2".to_string(),
                filename: "b.mkv".to_string(),
                bytes: 1024 * 1024 * 1024,
                status: "downloaded".to_string(),
                generated: None,
            },
            Download {
                id: "3".to_string(),
                filename: "c.mkv".to_string(),
                bytes: 0,
                status: String::new(),
                generated: None,
            },
        ];

        let stats = DownloadStats::from_downloads(&downloads);
        assert_eq!(stats.total_downloads, 3);
        assert_eq!(stats.total_gib(), 2.0);
        assert_eq!(stats.status_counts.get("downloaded"), Some(&2));
        assert_eq!(stats.status_counts.get("unknown"), Some(&1));
    }

    #[test]
    fn test_stats_empty() {
        let stats = DownloadStats::from_downloads(&[]);
        assert_eq!(stats, DownloadStats::default());
    }
}
