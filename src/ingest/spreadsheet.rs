//! Spreadsheet ingestion service
//!
//! Parses an external CSV file into rows and inserts them into the
//! destination table for one of the fixed data kinds. Row 1 is the header
//! and is never validated; data rows start at row 2 and run through the
//! last populated row.
//!
//! Rows are inserted one at a time, mirroring the per-statement insert
//! discipline of the rest of the store. A cell parse failure aborts
//! ingestion with a format error; rows inserted before the failing row
//! are NOT rolled back. That partial-commit behavior is part of the
//! documented contract, not an accident.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};

use crate::audit::AuditSink;
use crate::config::paths::EnvmonPaths;
use crate::error::{EnvmonError, EnvmonResult};
use crate::storage::Storage;

use super::kinds::{CellType, Column, DataKind};

/// Ingests spreadsheet files into provisioned data tables
pub struct SpreadsheetIngester {
    storage: Storage,
    audit: AuditSink,
    delimiter: u8,
}

impl SpreadsheetIngester {
    /// Create a new ingester with the default comma delimiter
    pub fn new(paths: EnvmonPaths) -> EnvmonResult<Self> {
        let storage = Storage::new(paths)?;
        let audit = AuditSink::new(storage.audit_logs.clone());
        Ok(Self {
            storage,
            audit,
            delimiter: b',',
        })
    }

    /// Override the cell delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Access the underlying record store
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Provision the destination tables for every data kind
    ///
    /// Idempotent; suitable as a one-time setup step so ingestion never
    /// pays for schema creation.
    pub fn provision_all_tables(&self) -> EnvmonResult<()> {
        for kind in DataKind::ALL {
            self.ensure_table(kind)?;
        }
        Ok(())
    }

    /// Ingest a spreadsheet file into the table for `kind`
    ///
    /// Returns the number of rows inserted.
    pub fn ingest(&self, source_path: &Path, kind: DataKind) -> EnvmonResult<usize> {
        if !source_path.exists() {
            return Err(EnvmonError::file_not_found(
                source_path.display().to_string(),
            ));
        }

        self.ensure_table(kind)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(source_path)
            .map_err(|e| EnvmonError::Io(format!("Failed to open spreadsheet: {}", e)))?;

        let columns = kind.columns();
        let mut inserted = 0;

        for (idx, result) in reader.records().enumerate() {
            // Row 1 is the header, so the first data record is row 2
            let row_number = idx + 2;

            let record = result.map_err(|e| EnvmonError::Format {
                row: row_number,
                column: "*".to_string(),
                message: format!("malformed record: {}", e),
            })?;

            let row = parse_row(&record, columns, row_number)?;
            self.storage.tables.append_row(kind.table_name(), row)?;
            inserted += 1;
        }

        let file_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source_path.display().to_string());
        self.audit.record(
            "SpreadsheetImport",
            format!("Imported {} from spreadsheet file: {}", kind, file_name),
        )?;

        Ok(inserted)
    }

    /// Create the destination table for `kind` if it doesn't exist
    fn ensure_table(&self, kind: DataKind) -> EnvmonResult<()> {
        let names: Vec<&str> = kind.columns().iter().map(|c| c.name).collect();
        self.storage.tables.provision(kind.table_name(), &names)
    }
}

/// Parse one CSV record against a column schema
fn parse_row(
    record: &csv::StringRecord,
    columns: &[Column],
    row_number: usize,
) -> EnvmonResult<Map<String, Value>> {
    let mut row = Map::new();

    for (idx, column) in columns.iter().enumerate() {
        let cell = record.get(idx).unwrap_or("").trim();
        let value = parse_cell(cell, column.cell_type).ok_or_else(|| EnvmonError::Format {
            row: row_number,
            column: column.name.to_string(),
            message: cell_error(cell, column.cell_type),
        })?;
        row.insert(column.name.to_string(), value);
    }

    Ok(row)
}

/// Parse one cell according to its column type
fn parse_cell(cell: &str, cell_type: CellType) -> Option<Value> {
    match cell_type {
        CellType::Text => Some(Value::String(cell.to_string())),
        CellType::Decimal => {
            let number = cell.parse::<f64>().ok()?;
            Number::from_f64(number).map(Value::Number)
        }
        CellType::Timestamp => {
            parse_timestamp(cell).map(|ts| Value::String(ts.to_rfc3339()))
        }
    }
}

fn cell_error(cell: &str, cell_type: CellType) -> String {
    match cell_type {
        CellType::Timestamp => format!("invalid timestamp: '{}'", cell),
        CellType::Decimal => format!("invalid decimal: '{}'", cell),
        CellType::Text => format!("invalid text: '{}'", cell),
    }
}

/// Parse a timestamp cell using multiple format attempts
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    // Date-only cells land at midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn test_ingester() -> (SpreadsheetIngester, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvmonPaths::with_base_dir(temp_dir.path().to_path_buf());
        let ingester = SpreadsheetIngester::new(paths).unwrap();
        (ingester, temp_dir)
    }

    fn write_weather_csv(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join("weather.csv");
        let mut contents = String::from(
            "Timestamp,Temperature,Humidity,Wind Speed,Wind Direction,Precipitation,Location\n",
        );
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_ingest_weather_rows() {
        let (ingester, temp) = test_ingester();
        let path = write_weather_csv(
            temp.path(),
            &[
                "2025-06-01 00:00:00,21.5,60.2,3.4,NW,0.0,Station 1",
                "2025-06-01 01:00:00,20.9,62.8,2.1,N,0.2,Station 1",
            ],
        );

        let inserted = ingester.ingest(&path, DataKind::Weather).unwrap();
        assert_eq!(inserted, 2);

        let rows = ingester.storage().tables.rows("weather_data").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["temperature"], json!(21.5));
        assert_eq!(rows[0]["wind_direction"], json!("NW"));
        assert_eq!(rows[1]["location"], json!("Station 1"));

        let events = ingester.storage().audit_logs.get_all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "SpreadsheetImport");
        assert!(events[0].description.contains("weather.csv"));
    }

    #[test]
    fn test_ingest_missing_file_is_not_found() {
        let (ingester, temp) = test_ingester();

        let err = ingester
            .ingest(&temp.path().join("absent.csv"), DataKind::Weather)
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_cell_aborts_without_rollback() {
        let (ingester, temp) = test_ingester();
        // Rows 2-4 are valid; row 5 has a non-numeric temperature
        let path = write_weather_csv(
            temp.path(),
            &[
                "2025-06-01 00:00:00,21.5,60.2,3.4,NW,0.0,Station 1",
                "2025-06-01 01:00:00,20.9,62.8,2.1,N,0.2,Station 1",
                "2025-06-01 02:00:00,20.1,64.0,1.8,NE,0.0,Station 1",
                "2025-06-01 03:00:00,broken,65.5,1.2,E,0.0,Station 1",
            ],
        );

        let err = ingester.ingest(&path, DataKind::Weather).unwrap_err();

        match err {
            EnvmonError::Format { row, column, .. } => {
                assert_eq!(row, 5);
                assert_eq!(column, "temperature");
            }
            other => panic!("expected format error, got {:?}", other),
        }

        // Rows committed before the failure stay committed
        assert_eq!(
            ingester.storage().tables.row_count("weather_data").unwrap(),
            3
        );

        // No audit event for a failed ingestion
        assert!(ingester.storage().audit_logs.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_ingest_metadata_timestamps() {
        let (ingester, temp) = test_ingester();
        let path = temp.path().join("metadata.csv");
        fs::write(
            &path,
            "Sensor ID,Location,Latitude,Longitude,Installed,Last Maintenance,Type,Manufacturer,Model\n\
             WS-01,Bridge 4,55.95,-3.19,2024-03-15,2025-05-01 09:30:00,weather,Acme,WX200\n",
        )
        .unwrap();

        let inserted = ingester.ingest(&path, DataKind::Metadata).unwrap();
        assert_eq!(inserted, 1);

        let rows = ingester.storage().tables.rows("sensor_metadata").unwrap();
        assert_eq!(rows[0]["sensor_id"], json!("WS-01"));
        assert_eq!(rows[0]["latitude"], json!(55.95));
        // Date-only cell parsed to midnight UTC
        assert_eq!(
            rows[0]["installation_date"],
            json!("2024-03-15T00:00:00+00:00")
        );
    }

    #[test]
    fn test_repeated_ingest_accumulates_rows() {
        let (ingester, temp) = test_ingester();
        let path = write_weather_csv(
            temp.path(),
            &["2025-06-01 00:00:00,21.5,60.2,3.4,NW,0.0,Station 1"],
        );

        ingester.ingest(&path, DataKind::Weather).unwrap();
        ingester.ingest(&path, DataKind::Weather).unwrap();

        assert_eq!(
            ingester.storage().tables.row_count("weather_data").unwrap(),
            2
        );
    }

    #[test]
    fn test_provision_all_tables() {
        let (ingester, _temp) = test_ingester();

        ingester.provision_all_tables().unwrap();

        for kind in DataKind::ALL {
            assert!(ingester.storage().tables.is_provisioned(kind.table_name()));
        }
    }

    #[test]
    fn test_header_row_is_never_validated() {
        let (ingester, temp) = test_ingester();
        let path = temp.path().join("weather.csv");
        // Garbage header, one valid data row
        fs::write(
            &path,
            "what,ever,this,says,does,not,matter\n\
             2025-06-01 00:00:00,21.5,60.2,3.4,NW,0.0,Station 1\n",
        )
        .unwrap();

        let inserted = ingester.ingest(&path, DataKind::Weather).unwrap();
        assert_eq!(inserted, 1);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-06-01 12:30:00").is_some());
        assert!(parse_timestamp("2025-06-01T12:30:00").is_some());
        assert!(parse_timestamp("2025-06-01T12:30:00+00:00").is_some());
        assert!(parse_timestamp("01/06/2025 12:30").is_some());
        assert!(parse_timestamp("2025-06-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
