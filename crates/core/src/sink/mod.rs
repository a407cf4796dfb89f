//! Output sinks for resolved watch-history entries.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::importer::TraktEntry;

/// Errors that can occur while persisting entries.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for resolved entries.
#[async_trait]
pub trait EntrySink: Send + Sync {
    async fn write_entries(&self, entries: &[TraktEntry]) -> Result<(), SinkError>;
}

/// Writes entries as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EntrySink for JsonFileSink {
    async fn write_entries(&self, entries: &[TraktEntry]) -> Result<(), SinkError> {
        write_json(&self.path, entries).await?;
        info!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SinkError> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExternalId;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_json_file_sink_writes_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("import.json");
        let sink = JsonFileSink::new(&path);

        let entries = vec![
            TraktEntry {
                imdb_id: ExternalId::parse("tt0133093").unwrap(),
                watched_at: Some("2023-06-15T20:30:00Z".to_string()),
            },
            TraktEntry {
                imdb_id: ExternalId::parse("tt0903747").unwrap(),
                watched_at: None,
            },
        ];
        sink.write_entries(&entries).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"imdb_id": "tt0133093", "watched_at": "2023-06-15T20:30:00Z"},
                {"imdb_id": "tt0903747", "watched_at": null}
            ])
        );
        assert!(written.contains('\n'));
    }

    #[tokio::test]
    async fn test_json_file_sink_empty_list() {
        let dir = TempDir::new().unwrap();
        let sink = JsonFileSink::new(dir.path().join("empty.json"));

        sink.write_entries(&[]).await.unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written, "[]");
    }

    #[tokio::test]
    async fn test_write_json_downloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("downloads.json");
        let downloads = vec![fixtures::download("A", "Heat.1995.mkv", Some(10))];

        write_json(&path, &downloads).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<crate::source::Download> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, downloads);
    }

    #[tokio::test]
    async fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be overwritten as a file.
        let sink = JsonFileSink::new(dir.path());

        let result = sink.write_entries(&[]).await;
        assert!(matches!(result, Err(SinkError::Io(_))));
    }
}
