//! Data export, import, and ingestion CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::paths::EnvmonPaths;
use crate::config::settings::Settings;
use crate::error::EnvmonResult;
use crate::ingest::{DataKind, SpreadsheetIngester};
use crate::snapshot::{EntityKind, SnapshotManager};

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Export one entity kind to a timestamped JSON file
    Export {
        /// Entity kind: users, sensors, audit_logs, maintenance_schedule
        kind: String,
    },

    /// Import one entity kind from a JSON record-set file
    Import {
        /// Path to the record-set file
        file: PathBuf,

        /// Entity kind: users, sensors, audit_logs, maintenance_schedule
        kind: String,
    },

    /// Ingest a spreadsheet (CSV) file into a data table
    Ingest {
        /// Path to the CSV file
        file: PathBuf,

        /// Data kind: weather, water_quality, air_quality, metadata
        kind: String,
    },

    /// Show the provisioned data tables and their row counts
    Tables,
}

/// Handle a data command
pub fn handle_data_command(
    paths: &EnvmonPaths,
    settings: &Settings,
    cmd: DataCommands,
) -> EnvmonResult<()> {
    match cmd {
        DataCommands::Export { kind } => {
            let kind = EntityKind::parse(&kind)?;
            let manager = SnapshotManager::new(paths.clone())?;

            let path = manager.export_entity(kind)?;
            println!("Exported {} to: {}", kind, path.display());
        }

        DataCommands::Import { file, kind } => {
            let kind = EntityKind::parse(&kind)?;
            let manager = SnapshotManager::new(paths.clone())?;

            manager.import_entity(&file, kind)?;
            println!("Imported {} from: {}", kind, file.display());
        }

        DataCommands::Ingest { file, kind } => {
            let kind = DataKind::parse(&kind)?;
            let ingester = SpreadsheetIngester::new(paths.clone())?
                .with_delimiter(settings.csv_delimiter);

            let inserted = ingester.ingest(&file, kind)?;
            println!(
                "Ingested {} row(s) from {} into table '{}'",
                inserted,
                file.display(),
                kind.table_name()
            );
        }

        DataCommands::Tables => {
            let ingester = SpreadsheetIngester::new(paths.clone())?;
            let tables = ingester.storage().tables.clone();

            println!("Data Tables");
            println!("===========");
            for kind in DataKind::ALL {
                let name = kind.table_name();
                if tables.is_provisioned(name) {
                    println!("  {:<20} {} row(s)", name, tables.row_count(name)?);
                } else {
                    println!("  {:<20} not provisioned", name);
                }
            }
        }
    }

    Ok(())
}
