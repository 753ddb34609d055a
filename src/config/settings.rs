//! User settings for envmon-cli
//!
//! Manages operator preferences such as the default snapshot retention
//! period and the CSV delimiter used for spreadsheet ingestion.

use serde::{Deserialize, Serialize};

use super::paths::EnvmonPaths;
use crate::error::EnvmonError;

/// User settings for envmon-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default number of days snapshots are kept by the retention sweep
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Delimiter used when parsing ingested spreadsheet files
    #[serde(default = "default_delimiter")]
    pub csv_delimiter: char,
}

fn default_schema_version() -> u32 {
    1
}

fn default_retention_days() -> u32 {
    30
}

fn default_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            retention_days: default_retention_days(),
            csv_delimiter: default_delimiter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnvmonPaths) -> Result<Self, EnvmonError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Self::default();
            paths.ensure_directories()?;
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| EnvmonError::Io(format!("Failed to read settings: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| EnvmonError::Json(format!("Failed to parse settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvmonPaths) -> Result<(), EnvmonError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EnvmonError::Json(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), json)
            .map_err(|e| EnvmonError::Io(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.retention_days, 30);
        assert_eq!(settings.csv_delimiter, ',');
    }

    #[test]
    fn test_load_or_create_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());
        assert_eq!(settings.retention_days, 30);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let mut settings = Settings::default();
        settings.retention_days = 90;
        settings.save(&paths).unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.retention_days, 90);
    }
}
