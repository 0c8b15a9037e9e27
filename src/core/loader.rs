//! Firewall document loading
//!
//! Documents are JSON files; the default one is `firewall.json` in the
//! application's data directory.

use crate::core::error::Result;
use crate::core::firewall::Firewall;
use crate::utils::get_data_dir;
use std::path::{Path, PathBuf};

/// File name looked up in the data directory when no path is given.
pub const DEFAULT_DOCUMENT_NAME: &str = "firewall.json";

/// Path of the default firewall document, if a data directory is available.
pub fn default_document_path() -> Option<PathBuf> {
    get_data_dir().map(|mut path| {
        path.push(DEFAULT_DOCUMENT_NAME);
        path
    })
}

/// Reads and builds a firewall from a JSON document on disk.
///
/// # Async
/// Uses `tokio::fs` for non-blocking file I/O.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read, and
/// the errors of [`Firewall::from_json_str`] otherwise.
pub async fn load_firewall(path: &Path, group_id: &str, list_label: &str) -> Result<Firewall> {
    let json = tokio::fs::read_to_string(path).await?;
    tracing::info!("Loading firewall document {}", path.display());
    Firewall::from_json_str(&json, group_id, list_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::test_helpers::{SAMPLE_DOCUMENT, TEST_GROUP};
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DOCUMENT.as_bytes()).unwrap();

        let fw = load_firewall(file.path(), TEST_GROUP, "access-list")
            .await
            .unwrap();
        assert_eq!(fw.acl().len(), 2);
        assert_eq!(fw.interfaces().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_firewall(&dir.path().join("nope.json"), "1", "access-list")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_firewall(file.path(), "1", "access-list")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { .. }));
    }

    #[test]
    fn test_default_document_name() {
        if let Some(path) = default_document_path() {
            assert!(path.ends_with(DEFAULT_DOCUMENT_NAME));
        }
    }
}
