//! Storage layer for envmon-cli
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each repository opens its record file for the duration of one
//! operation and releases it immediately; nothing is pooled or cached.

pub mod audit_logs;
pub mod file_io;
pub mod maintenance;
pub mod sensors;
pub mod tables;
pub mod users;

pub use audit_logs::AuditLogRepository;
pub use file_io::{read_json, write_json_atomic};
pub use maintenance::MaintenanceRepository;
pub use sensors::SensorRepository;
pub use tables::{TableData, TableStore};
pub use users::UserRepository;

use crate::config::paths::EnvmonPaths;
use crate::error::{EnvmonError, EnvmonResult};
use crate::models::MaintenanceEntry;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: EnvmonPaths,
    pub users: UserRepository,
    pub sensors: SensorRepository,
    pub audit_logs: AuditLogRepository,
    pub maintenance: MaintenanceRepository,
    pub tables: TableStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: EnvmonPaths) -> Result<Self, EnvmonError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            sensors: SensorRepository::new(paths.sensors_file()),
            audit_logs: AuditLogRepository::new(paths.audit_logs_file()),
            maintenance: MaintenanceRepository::new(paths.maintenance_file()),
            tables: TableStore::new(paths.tables_dir()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &EnvmonPaths {
        &self.paths
    }

    /// Insert a maintenance entry after validating its sensor reference
    ///
    /// This is the storage-level stand-in for a foreign key constraint:
    /// the referenced sensor must exist at insert time, whatever state the
    /// store is in.
    pub fn insert_maintenance(&self, entry: MaintenanceEntry) -> EnvmonResult<()> {
        if !self.sensors.exists(entry.sensor_id)? {
            return Err(EnvmonError::sensor_not_found(entry.sensor_id.to_string()));
        }
        self.maintenance.insert(entry)
    }
}
