//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits,
//! allowing the resolver and importer to be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use rewatch_core::testing::{fixtures, MockCatalog, MockDownloadSource};
//!
//! let catalog = MockCatalog::new();
//! catalog.add_title(fixtures::movie(603, "The Matrix", 1999, "tt0133093")).await;
//!
//! let source = MockDownloadSource::with_downloads(vec![
//!     fixtures::download("1", "The.Matrix.1999.1080p.BluRay.x264-GROUP.mkv", None),
//! ]);
//! ```

mod mock_catalog;
mod mock_download_source;

pub use mock_catalog::{MockCatalog, MockTitle, RecordedCatalogQuery};
pub use mock_download_source::MockDownloadSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use super::MockTitle;
    use crate::catalog::MediaKind;
    use crate::source::Download;

    /// Create a catalog movie with a cross-reference.
    pub fn movie(catalog_id: u32, title: &str, year: u32, external_id: &str) -> MockTitle {
        MockTitle {
            catalog_id,
            kind: MediaKind::Movie,
            title: title.to_string(),
            year: Some(year),
            external_id: Some(external_id.to_string()),
        }
    }

    /// Create a catalog TV series with a cross-reference.
    pub fn show(catalog_id: u32, name: &str, first_air_year: u32, external_id: &str) -> MockTitle {
        MockTitle {
            catalog_id,
            kind: MediaKind::Show,
            title: name.to_string(),
            year: Some(first_air_year),
            external_id: Some(external_id.to_string()),
        }
    }

    /// Create a catalog entry that has no cross-reference.
    pub fn unlinked(catalog_id: u32, kind: MediaKind, title: &str) -> MockTitle {
        MockTitle {
            catalog_id,
            kind,
            title: title.to_string(),
            year: None,
            external_id: None,
        }
    }

    /// Create a download history record with reasonable defaults.
    pub fn download(id: &str, filename: &str, generated: Option<i64>) -> Download {
        Download {
            id: id.to_string(),
            filename: filename.to_string(),
            bytes: 1024 * 1024 * 1024 * 2, // 2 GB
            status: "downloaded".to_string(),
            generated,
        }
    }
}
