//! Spreadsheet ingestion for envmon-cli
//!
//! Parses external CSV files into rows and inserts them into
//! auto-provisioned destination tables, one of four fixed data kinds:
//! weather, water quality, air quality, and sensor metadata.

pub mod kinds;
pub mod spreadsheet;

pub use kinds::{CellType, Column, DataKind};
pub use spreadsheet::SpreadsheetIngester;
