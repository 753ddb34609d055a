//! Snapshot manager for envmon-cli
//!
//! Creates snapshots of the record store, lists and deletes them, applies
//! the retention policy, and handles single-kind exports and imports.
//! Snapshots are zip archives named `backup_<YYYYMMDD_HHMMSS>.zip` in the
//! backup directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::audit::AuditSink;
use crate::config::paths::EnvmonPaths;
use crate::error::{EnvmonError, EnvmonResult};
use crate::models::{AuditLogEntry, MaintenanceEntry, Sensor, User};
use crate::storage::Storage;

use super::archive::{pack_directory, ScratchDir};
use super::codec::{self, EntityKind};
use super::manifest::{SnapshotManifest, MANIFEST_FILE};

/// Prefix shared by every snapshot file name
pub const SNAPSHOT_PREFIX: &str = "backup_";

/// Extension shared by every snapshot file name
pub const SNAPSHOT_EXTENSION: &str = ".zip";

/// Build the snapshot file name for a creation time (second resolution)
pub fn snapshot_file_name(at: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        SNAPSHOT_PREFIX,
        at.format("%Y%m%d_%H%M%S"),
        SNAPSHOT_EXTENSION
    )
}

/// Parse the creation time encoded in a snapshot file name
pub fn parse_snapshot_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_EXTENSION)?;
    let naive = NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").ok()?;
    Some(DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Manages snapshot creation, listing, deletion, and retention
pub struct SnapshotManager {
    paths: EnvmonPaths,
    storage: Storage,
    audit: AuditSink,
}

impl SnapshotManager {
    /// Create a new SnapshotManager
    pub fn new(paths: EnvmonPaths) -> EnvmonResult<Self> {
        let storage = Storage::new(paths.clone())?;
        let audit = AuditSink::new(storage.audit_logs.clone());
        Ok(Self {
            paths,
            storage,
            audit,
        })
    }

    /// Access the underlying record store
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub(crate) fn audit(&self) -> &AuditSink {
        &self.audit
    }

    /// Resolve a snapshot name to its path in the backup directory
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.paths.backup_dir().join(name)
    }

    /// Create a snapshot of all entity kinds
    ///
    /// Every record set is staged completely before archiving begins; a
    /// failure in any export step aborts before an archive is created, and
    /// the staging directory is removed on every exit path. Two snapshots
    /// taken within the same second collide on the archive name and the
    /// later one overwrites the earlier (known limitation).
    ///
    /// Returns the path to the created archive.
    pub fn create_snapshot(&self, description: Option<&str>) -> EnvmonResult<PathBuf> {
        let backup_dir = self.paths.backup_dir();
        fs::create_dir_all(&backup_dir)
            .map_err(|e| EnvmonError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let file_name = snapshot_file_name(now);
        let archive_path = backup_dir.join(&file_name);

        let staging = ScratchDir::new(&self.paths.scratch_dir())?;

        for kind in EntityKind::REPLAY_ORDER {
            self.export_entity_to(kind, &staging.path().join(kind.file_name()))?;
        }

        let manifest = SnapshotManifest::new(now, description.map(|d| d.to_string()));
        manifest.write_to(&staging.path().join(MANIFEST_FILE))?;

        pack_directory(staging.path(), &archive_path)?;

        let suffix = description
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        self.audit
            .record("DataBackup", format!("Created backup: {}{}", file_name, suffix))?;

        Ok(archive_path)
    }

    /// List snapshot names in descending lexicographic order
    ///
    /// The naming convention makes this reverse chronological as well.
    pub fn list_snapshots(&self) -> EnvmonResult<Vec<String>> {
        let backup_dir = self.paths.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = fs::read_dir(&backup_dir)
            .map_err(|e| EnvmonError::Io(format!("Failed to read backup directory: {}", e)))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| EnvmonError::Io(format!("Failed to read directory entry: {}", e)))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(SNAPSHOT_EXTENSION) {
                names.push(name);
            }
        }

        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Delete a snapshot by name
    ///
    /// Deleting an absent snapshot is a silent no-op; a successful deletion
    /// emits one audit event.
    pub fn delete_snapshot(&self, name: &str) -> EnvmonResult<()> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)
            .map_err(|e| EnvmonError::Io(format!("Failed to delete snapshot: {}", e)))?;

        self.audit
            .record("BackupDeleted", format!("Deleted backup: {}", name))?;

        Ok(())
    }

    /// Delete snapshots older than the given number of days
    ///
    /// Age is measured against the creation time encoded in each snapshot
    /// name; files that don't parse under the naming convention are left
    /// alone. Each deleted snapshot gets its own audit event via
    /// `delete_snapshot`, and one summary event is emitted regardless of
    /// how many files were removed.
    ///
    /// Returns the names of the deleted snapshots.
    pub fn apply_retention(&self, days_to_keep: u32) -> EnvmonResult<Vec<String>> {
        let cutoff = Utc::now() - chrono::Duration::days(days_to_keep as i64);
        let mut deleted = Vec::new();

        for name in self.list_snapshots()? {
            if let Some(created) = parse_snapshot_timestamp(&name) {
                if created < cutoff {
                    self.delete_snapshot(&name)?;
                    deleted.push(name);
                }
            }
        }

        self.audit.record(
            "RetentionPolicy",
            format!("Applied retention policy: keeping backups for {} days", days_to_keep),
        )?;

        Ok(deleted)
    }

    /// Export one entity kind to a timestamped file in the export directory
    pub fn export_entity(&self, kind: EntityKind) -> EnvmonResult<PathBuf> {
        let export_dir = self.paths.export_dir();
        fs::create_dir_all(&export_dir)
            .map_err(|e| EnvmonError::Io(format!("Failed to create export directory: {}", e)))?;

        let file_name = format!(
            "{}_{}.json",
            kind.selector(),
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = export_dir.join(&file_name);

        self.export_entity_to(kind, &path)?;

        self.audit
            .record("DataExport", format!("Exported {} to {}", kind, file_name))?;

        Ok(path)
    }

    /// Import one entity kind from a record-set file
    ///
    /// Every record is inserted individually; an id collision surfaces the
    /// store's conflict error and aborts the remaining records.
    pub fn import_entity(&self, path: &Path, kind: EntityKind) -> EnvmonResult<()> {
        self.import_entity_from(path, kind)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.audit
            .record("DataImport", format!("Imported {} from {}", kind, file_name))?;

        Ok(())
    }

    /// Encode one entity kind's full record set into a file
    pub(crate) fn export_entity_to(&self, kind: EntityKind, dest: &Path) -> EnvmonResult<()> {
        let encoded = match kind {
            EntityKind::Users => codec::encode_records(&self.storage.users.get_all()?)?,
            EntityKind::Sensors => codec::encode_records(&self.storage.sensors.get_all()?)?,
            EntityKind::AuditLogs => codec::encode_records(&self.storage.audit_logs.get_all()?)?,
            EntityKind::MaintenanceSchedule => {
                codec::encode_records(&self.storage.maintenance.get_all()?)?
            }
        };

        fs::write(dest, encoded)
            .map_err(|e| EnvmonError::Io(format!("Failed to write record set: {}", e)))
    }

    /// Decode a record-set file and insert every record into the store
    pub(crate) fn import_entity_from(&self, path: &Path, kind: EntityKind) -> EnvmonResult<()> {
        if !path.exists() {
            return Err(EnvmonError::file_not_found(path.display().to_string()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| EnvmonError::Io(format!("Failed to read record set: {}", e)))?;

        match kind {
            EntityKind::Users => {
                for record in codec::decode_records::<User>(&contents)? {
                    self.storage.users.insert(record)?;
                }
            }
            EntityKind::Sensors => {
                for record in codec::decode_records::<Sensor>(&contents)? {
                    self.storage.sensors.insert(record)?;
                }
            }
            EntityKind::AuditLogs => {
                for record in codec::decode_records::<AuditLogEntry>(&contents)? {
                    self.storage.audit_logs.insert(record)?;
                }
            }
            EntityKind::MaintenanceSchedule => {
                for record in codec::decode_records::<MaintenanceEntry>(&contents)? {
                    self.storage.insert_maintenance(record)?;
                }
            }
        }

        Ok(())
    }
}
