//! Path management for envmon-cli
//!
//! Provides XDG-compliant path resolution for configuration, data, backups,
//! and scratch space.
//!
//! ## Path Resolution Order
//!
//! 1. `ENVMON_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/envmon-cli` or `~/.config/envmon-cli`
//! 3. Windows: `%APPDATA%\envmon-cli`

use std::path::PathBuf;

use crate::error::EnvmonError;

/// Manages all paths used by envmon-cli
#[derive(Debug, Clone)]
pub struct EnvmonPaths {
    /// Base directory for all envmon-cli data
    base_dir: PathBuf,
}

impl EnvmonPaths {
    /// Create a new EnvmonPaths instance
    ///
    /// Path resolution:
    /// 1. `ENVMON_CLI_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/envmon-cli` or `~/.config/envmon-cli`
    /// 3. Windows: `%APPDATA%\envmon-cli`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, EnvmonError> {
        let base_dir = if let Ok(custom) = std::env::var("ENVMON_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create EnvmonPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/envmon-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/envmon-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (~/.config/envmon-cli/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the export directory for single-kind exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the scratch directory for snapshot staging and extraction
    ///
    /// Scratch subdirectories are created per operation and removed when the
    /// operation finishes, whether it succeeds or fails.
    pub fn scratch_dir(&self) -> PathBuf {
        self.base_dir.join("tmp")
    }

    /// Get the directory holding ingested data tables
    pub fn tables_dir(&self) -> PathBuf {
        self.data_dir().join("tables")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to sensors.json
    pub fn sensors_file(&self) -> PathBuf {
        self.data_dir().join("sensors.json")
    }

    /// Get the path to audit_logs.json
    pub fn audit_logs_file(&self) -> PathBuf {
        self.data_dir().join("audit_logs.json")
    }

    /// Get the path to maintenance_schedule.json
    pub fn maintenance_file(&self) -> PathBuf {
        self.data_dir().join("maintenance_schedule.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/envmon-cli/)
    /// - Data directory and tables subdirectory
    /// - Backup, export, and scratch directories
    pub fn ensure_directories(&self) -> Result<(), EnvmonError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvmonError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| EnvmonError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.tables_dir())
            .map_err(|e| EnvmonError::Io(format!("Failed to create tables directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| EnvmonError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| EnvmonError::Io(format!("Failed to create export directory: {}", e)))?;

        std::fs::create_dir_all(self.scratch_dir())
            .map_err(|e| EnvmonError::Io(format!("Failed to create scratch directory: {}", e)))?;

        Ok(())
    }

    /// Check if envmon-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, EnvmonError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("envmon-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, EnvmonError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| EnvmonError::Config("APPDATA environment variable not set".to_string()))?;
    Ok(PathBuf::from(appdata).join("envmon-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(
            paths.tables_dir(),
            temp_dir.path().join("data").join("tables")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.export_dir().exists());
        assert!(paths.scratch_dir().exists());
        assert!(paths.tables_dir().exists());
    }

    #[test]
    fn test_entity_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.users_file(),
            temp_dir.path().join("data").join("users.json")
        );
        assert_eq!(
            paths.maintenance_file(),
            temp_dir.path().join("data").join("maintenance_schedule.json")
        );
    }

    #[test]
    fn test_not_initialized_without_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(!paths.is_initialized());
    }
}
