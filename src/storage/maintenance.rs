//! Maintenance schedule repository for JSON storage
//!
//! The sensor reference check lives on [`Storage`](super::Storage), which
//! plays the role a foreign key constraint would in a relational store.

use std::path::PathBuf;

use crate::error::{EnvmonError, EnvmonResult};
use crate::models::MaintenanceEntry;

use super::file_io::{read_json, write_json_atomic};

/// Serializable maintenance record file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MaintenanceData {
    entries: Vec<MaintenanceEntry>,
}

/// Repository for maintenance schedule persistence
#[derive(Debug, Clone)]
pub struct MaintenanceRepository {
    path: PathBuf,
}

impl MaintenanceRepository {
    /// Create a new maintenance repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get all entries in insertion order
    pub fn get_all(&self) -> EnvmonResult<Vec<MaintenanceEntry>> {
        let data: MaintenanceData = read_json(&self.path)?;
        Ok(data.entries)
    }

    /// Insert an entry, keeping its id
    ///
    /// Fails with a conflict error if an entry with the same id already
    /// exists. Callers go through `Storage::insert_maintenance`, which
    /// validates the sensor reference first.
    pub fn insert(&self, entry: MaintenanceEntry) -> EnvmonResult<()> {
        let mut data: MaintenanceData = read_json(&self.path)?;

        if data.entries.iter().any(|e| e.id == entry.id) {
            return Err(EnvmonError::conflict("MaintenanceEntry", entry.id));
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
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_insert_and_get_all() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MaintenanceRepository::new(temp_dir.path().join("maintenance.json"));

        repo.insert(MaintenanceEntry::new(1, 42, "Gauge", Utc::now()))
            .unwrap();

        let entries = repo.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sensor_id, 42);
    }

    #[test]
    fn test_insert_duplicate_id_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MaintenanceRepository::new(temp_dir.path().join("maintenance.json"));

        repo.insert(MaintenanceEntry::new(1, 42, "Gauge", Utc::now()))
            .unwrap();
        let err = repo
            .insert(MaintenanceEntry::new(1, 43, "Other", Utc::now()))
            .unwrap_err();

        assert!(err.is_conflict());
    }
}
