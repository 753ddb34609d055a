use anyhow::Result;
use clap::{Parser, Subcommand};

use envmon::cli::{handle_backup_command, handle_data_command, BackupCommands, DataCommands};
use envmon::config::{paths::EnvmonPaths, settings::Settings};
use envmon::ingest::SpreadsheetIngester;

#[derive(Parser)]
#[command(
    name = "envmon",
    version,
    about = "Terminal-based administration tool for an environmental sensor monitoring platform",
    long_about = "envmon-cli administers the data lifecycle of an environmental sensor \
                  monitoring platform: point-in-time snapshots of the record store, \
                  restore, retention enforcement, and spreadsheet ingestion."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Data export, import, and ingestion commands
    #[command(subcommand)]
    Data(DataCommands),

    /// Initialize directories, settings, and data tables
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = EnvmonPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Data(cmd)) => {
            handle_data_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing envmon-cli at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;

            // Provision every ingestion table up front so ingestion never
            // pays for schema creation
            let ingester = SpreadsheetIngester::new(paths.clone())?;
            ingester.provision_all_tables()?;

            println!("Initialization complete!");
            println!();
            println!("Data tables provisioned: weather_data, water_quality_data,");
            println!("air_quality_data, sensor_metadata.");
            println!();
            println!("Run 'envmon backup create' to take a first snapshot.");
        }
        Some(Commands::Config) => {
            println!("envmon-cli Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Retention days: {}", settings.retention_days);
            println!("  CSV delimiter:  '{}'", settings.csv_delimiter);
        }
        None => {
            println!("envmon-cli - Environmental sensor platform administration");
            println!();
            println!("Run 'envmon --help' for usage information.");
            println!("Run 'envmon init' to set up directories and data tables.");
        }
    }

    Ok(())
}
