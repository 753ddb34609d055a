//! Ingested data table storage
//!
//! Holds the destination tables for spreadsheet ingestion, one JSON file
//! per table under `data/tables/`. A table file records the provisioned
//! column schema alongside its rows, keeping the format self-describing.
//!
//! Provisioning is idempotent: `provision` is a no-op when the table file
//! already exists, so callers can run it cheaply before every ingestion
//! without repeated schema churn.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EnvmonError, EnvmonResult};

use super::file_io::{read_json, write_json_atomic};

/// On-disk representation of one ingested data table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    /// Provisioned column names, in schema order
    pub columns: Vec<String>,
    /// One object per ingested row, keyed by column name
    pub rows: Vec<Map<String, Value>>,
}

/// Storage for ingested data tables
#[derive(Debug, Clone)]
pub struct TableStore {
    dir: PathBuf,
}

impl TableStore {
    /// Create a new table store rooted at the given directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Check whether a table has been provisioned
    pub fn is_provisioned(&self, name: &str) -> bool {
        self.table_path(name).exists()
    }

    /// Create a table with the given column schema if it doesn't exist
    ///
    /// Idempotent: an already-provisioned table is left untouched, whatever
    /// its current contents.
    pub fn provision(&self, name: &str, columns: &[&str]) -> EnvmonResult<()> {
        if self.is_provisioned(name) {
            return Ok(());
        }

        let data = TableData {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        };
        write_json_atomic(self.table_path(name), &data)
    }

    /// Append one row to a provisioned table
    pub fn append_row(&self, name: &str, row: Map<String, Value>) -> EnvmonResult<()> {
        let path = self.table_path(name);
        if !path.exists() {
            return Err(EnvmonError::Storage(format!(
                "Table '{}' has not been provisioned",
                name
            )));
        }

        let mut data: TableData = read_json(&path)?;
        data.rows.push(row);
        write_json_atomic(&path, &data)
    }

    /// Get all rows of a table (empty if not provisioned)
    pub fn rows(&self, name: &str) -> EnvmonResult<Vec<Map<String, Value>>> {
        let data: TableData = read_json(self.table_path(name))?;
        Ok(data.rows)
    }

    /// Number of rows in a table (zero if not provisioned)
    pub fn row_count(&self, name: &str) -> EnvmonResult<usize> {
        Ok(self.rows(name)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_row(temperature: f64) -> Map<String, Value> {
        let mut row = Map::new();
        row.insert("timestamp".to_string(), json!("2025-06-01T00:00:00Z"));
        row.insert("temperature".to_string(), json!(temperature));
        row
    }

    #[test]
    fn test_provision_creates_table_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = TableStore::new(temp_dir.path().to_path_buf());

        assert!(!store.is_provisioned("weather_data"));
        store
            .provision("weather_data", &["timestamp", "temperature"])
            .unwrap();
        assert!(store.is_provisioned("weather_data"));

        // Re-provisioning must not clear existing rows
        store.append_row("weather_data", sample_row(21.5)).unwrap();
        store
            .provision("weather_data", &["timestamp", "temperature"])
            .unwrap();
        assert_eq!(store.row_count("weather_data").unwrap(), 1);
    }

    #[test]
    fn test_append_requires_provisioned_table() {
        let temp_dir = TempDir::new().unwrap();
        let store = TableStore::new(temp_dir.path().to_path_buf());

        let err = store.append_row("weather_data", sample_row(21.5)).unwrap_err();
        assert!(matches!(err, EnvmonError::Storage(_)));
    }

    #[test]
    fn test_rows_preserve_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = TableStore::new(temp_dir.path().to_path_buf());

        store
            .provision("weather_data", &["timestamp", "temperature"])
            .unwrap();
        store.append_row("weather_data", sample_row(1.0)).unwrap();
        store.append_row("weather_data", sample_row(2.0)).unwrap();

        let rows = store.rows("weather_data").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["temperature"], json!(1.0));
        assert_eq!(rows[1]["temperature"], json!(2.0));
    }
}
