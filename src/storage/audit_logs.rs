//! Audit log repository for JSON storage
//!
//! The audit log is append-only from the application's point of view.
//! `append` assigns the next id; `insert` keeps an existing id and is used
//! when replaying a snapshot.

use std::path::PathBuf;

use crate::error::{EnvmonError, EnvmonResult};
use crate::models::AuditLogEntry;

use super::file_io::{read_json, write_json_atomic};

/// Serializable audit log record file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AuditLogData {
    entries: Vec<AuditLogEntry>,
}

/// Repository for audit log persistence
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    path: PathBuf,
}

impl AuditLogRepository {
    /// Create a new audit log repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get all entries in insertion order
    pub fn get_all(&self) -> EnvmonResult<Vec<AuditLogEntry>> {
        let data: AuditLogData = read_json(&self.path)?;
        Ok(data.entries)
    }

    /// Append a new entry, assigning the next available id
    pub fn append(
        &self,
        event_type: &str,
        description: impl Into<String>,
        user_id: Option<i64>,
    ) -> EnvmonResult<AuditLogEntry> {
        let mut data: AuditLogData = read_json(&self.path)?;

        let next_id = data.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let entry = AuditLogEntry::new(next_id, event_type, description, user_id);

        data.entries.push(entry.clone());
        write_json_atomic(&self.path, &data)?;

        Ok(entry)
    }

    /// Insert an entry, keeping its id
    ///
    /// Fails with a conflict error if an entry with the same id already
    /// exists.
    pub fn insert(&self, entry: AuditLogEntry) -> EnvmonResult<()> {
        let mut data: AuditLogData = read_json(&self.path)?;

        if data.entries.iter().any(|e| e.id == entry.id) {
            return Err(EnvmonError::conflict("AuditLogEntry", entry.id));
        }

        data.entries.push(entry);
        write_json_atomic(&self.path, &data)
    }

    /// Number of stored entries
    pub fn count(&self) -> EnvmonResult<usize> {
        Ok(self.get_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_assigns_sequential_ids() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditLogRepository::new(temp_dir.path().join("audit_logs.json"));

        let first = repo.append("DataBackup", "Created backup", None).unwrap();
        let second = repo.append("DataRestore", "Restored backup", None).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_append_continues_after_insert() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditLogRepository::new(temp_dir.path().join("audit_logs.json"));

        repo.insert(AuditLogEntry::new(10, "Login", "User logged in", Some(1)))
            .unwrap();
        let next = repo.append("Logout", "User logged out", Some(1)).unwrap();

        assert_eq!(next.id, 11);
    }

    #[test]
    fn test_insert_duplicate_id_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditLogRepository::new(temp_dir.path().join("audit_logs.json"));

        repo.insert(AuditLogEntry::new(3, "Login", "first", None))
            .unwrap();
        let err = repo
            .insert(AuditLogEntry::new(3, "Login", "second", None))
            .unwrap_err();

        assert!(err.is_conflict());
    }
}
