//! Custom error types for envmon-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for envmon-cli operations
#[derive(Error, Debug)]
pub enum EnvmonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing archive, source file, or entity
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Insert rejected because the key already exists in the store
    #[error("{entity_type} already exists: {identifier}")]
    Conflict {
        entity_type: &'static str,
        identifier: String,
    },

    /// Snapshot archive is missing or has a corrupt manifest
    #[error("Invalid snapshot format: {0}")]
    InvalidFormat(String),

    /// Unrecognized entity kind or data kind selector
    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    /// A cell failed to parse during spreadsheet ingestion
    #[error("Row {row}, column '{column}': {message}")]
    Format {
        row: usize,
        column: String,
        message: String,
    },
}

impl EnvmonError {
    /// Create a "not found" error for snapshots
    pub fn snapshot_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Snapshot",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for sensors
    pub fn sensor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Sensor",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for source files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Create a conflict error for a duplicate record id
    pub fn conflict(entity_type: &'static str, id: i64) -> Self {
        Self::Conflict {
            entity_type,
            identifier: id.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for EnvmonError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvmonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envmon-cli operations
pub type EnvmonResult<T> = Result<T, EnvmonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EnvmonError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = EnvmonError::snapshot_not_found("backup_20250101_000000.zip");
        assert_eq!(
            err.to_string(),
            "Snapshot not found: backup_20250101_000000.zip"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_error() {
        let err = EnvmonError::conflict("User", 7);
        assert_eq!(err.to_string(), "User already exists: 7");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_format_error() {
        let err = EnvmonError::Format {
            row: 5,
            column: "temperature".into(),
            message: "invalid decimal: 'abc'".into(),
        };
        assert_eq!(
            err.to_string(),
            "Row 5, column 'temperature': invalid decimal: 'abc'"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let envmon_err: EnvmonError = io_err.into();
        assert!(matches!(envmon_err, EnvmonError::Io(_)));
    }
}
