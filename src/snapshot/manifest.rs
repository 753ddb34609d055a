//! Snapshot manifest
//!
//! The manifest travels inside every snapshot archive as `metadata.json`.
//! A snapshot without a readable manifest is not valid for restore.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EnvmonError, EnvmonResult};

/// Snapshot format version written into every manifest
pub const FORMAT_VERSION: &str = "1.0";

/// Manifest file name inside a snapshot archive
pub const MANIFEST_FILE: &str = "metadata.json";

/// Metadata describing one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// When the snapshot was created (UTC)
    pub backup_date: DateTime<Utc>,

    /// Optional operator-supplied description
    pub description: Option<String>,

    /// Snapshot format version tag
    pub version: String,
}

impl SnapshotManifest {
    /// Create a manifest for a snapshot taken at the given time
    pub fn new(backup_date: DateTime<Utc>, description: Option<String>) -> Self {
        Self {
            backup_date,
            description,
            version: FORMAT_VERSION.to_string(),
        }
    }

    /// Write the manifest into a staging directory
    pub fn write_to(&self, path: &Path) -> EnvmonResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EnvmonError::Json(format!("Failed to serialize manifest: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| EnvmonError::Io(format!("Failed to write manifest: {}", e)))
    }

    /// Read a manifest from an extracted snapshot
    ///
    /// A manifest that exists but doesn't parse makes the whole snapshot
    /// invalid.
    pub fn read_from(path: &Path) -> EnvmonResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EnvmonError::Io(format!("Failed to read manifest: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| EnvmonError::InvalidFormat(format!("corrupt manifest: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MANIFEST_FILE);

        let manifest = SnapshotManifest::new(Utc::now(), Some("pre-upgrade".to_string()));
        manifest.write_to(&path).unwrap();

        let loaded = SnapshotManifest::read_from(&path).unwrap();
        assert_eq!(manifest, loaded);
        assert_eq!(loaded.version, FORMAT_VERSION);
    }

    #[test]
    fn test_no_description() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MANIFEST_FILE);

        SnapshotManifest::new(Utc::now(), None).write_to(&path).unwrap();

        let loaded = SnapshotManifest::read_from(&path).unwrap();
        assert!(loaded.description.is_none());
    }

    #[test]
    fn test_corrupt_manifest_is_invalid_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = SnapshotManifest::read_from(&path).unwrap_err();
        assert!(matches!(err, EnvmonError::InvalidFormat(_)));
    }
}
