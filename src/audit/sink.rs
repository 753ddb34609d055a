//! Audit sink writing free-text events into the store

use crate::error::EnvmonResult;
use crate::models::AuditLogEntry;
use crate::storage::AuditLogRepository;

/// Records audit events into the store's audit log
#[derive(Debug, Clone)]
pub struct AuditSink {
    repo: AuditLogRepository,
}

impl AuditSink {
    /// Create a new sink writing through the given repository
    pub fn new(repo: AuditLogRepository) -> Self {
        Self { repo }
    }

    /// Record one event, stamped with the current UTC time
    ///
    /// Tool-initiated events carry no user id.
    pub fn record(
        &self,
        event_type: &str,
        description: impl Into<String>,
    ) -> EnvmonResult<AuditLogEntry> {
        self.repo.append(event_type, description, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_appends_entry() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditLogRepository::new(temp_dir.path().join("audit_logs.json"));
        let sink = AuditSink::new(repo.clone());

        let entry = sink
            .record("DataBackup", "Created backup: backup_x.zip")
            .unwrap();

        assert_eq!(entry.event_type, "DataBackup");
        assert!(entry.user_id.is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_events_accumulate_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AuditLogRepository::new(temp_dir.path().join("audit_logs.json"));
        let sink = AuditSink::new(repo.clone());

        sink.record("DataBackup", "first").unwrap();
        sink.record("BackupDeleted", "second").unwrap();

        let entries = repo.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event_type, "DataBackup");
        assert_eq!(entries[1].event_type, "BackupDeleted");
    }
}
