//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::paths::EnvmonPaths;
use crate::config::settings::Settings;
use crate::error::EnvmonResult;
use crate::snapshot::{parse_snapshot_timestamp, RestoreManager, SnapshotManager};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new snapshot of all entity kinds
    Create {
        /// Free-text description stored in the snapshot manifest
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all available snapshots, newest first
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore the record store from a snapshot
    Restore {
        /// Snapshot filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the manifest of a specific snapshot
    Info {
        /// Snapshot filename or path
        backup: String,
    },

    /// Delete a snapshot by name
    Delete {
        /// Snapshot filename
        name: String,
    },

    /// Delete snapshots older than the retention period
    Retention {
        /// Days to keep (defaults to the configured retention period)
        #[arg(short, long)]
        days: Option<u32>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &EnvmonPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> EnvmonResult<()> {
    let manager = SnapshotManager::new(paths.clone())?;

    match cmd {
        BackupCommands::Create { description } => {
            println!("Creating snapshot...");
            let archive_path = manager.create_snapshot(description.as_deref())?;
            let filename = archive_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| archive_path.display().to_string());
            println!("Snapshot created: {}", filename);
            println!("Location: {}", archive_path.display());
        }

        BackupCommands::List { verbose } => {
            let snapshots = manager.list_snapshots()?;

            if snapshots.is_empty() {
                println!("No snapshots found.");
                println!("Create one with: envmon backup create");
                return Ok(());
            }

            println!("Available Snapshots");
            println!("===================");
            println!();

            for (i, name) in snapshots.iter().enumerate() {
                let path = manager.snapshot_path(name);
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                let created = parse_snapshot_timestamp(name);

                if verbose {
                    let created_str = created
                        .map(|c| c.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n",
                        i + 1,
                        name,
                        created_str,
                        format_size(size),
                    );
                } else {
                    let age = created
                        .map(|c| {
                            format_duration(chrono::Utc::now().signed_duration_since(c))
                        })
                        .unwrap_or_else(|| "?".to_string());
                    println!("  {}. {} ({} ago, {})", i + 1, name, age, format_size(size));
                }
            }

            println!();
            println!("Total: {} snapshot(s)", snapshots.len());
        }

        BackupCommands::Restore { backup, force } => {
            let archive_path = resolve_snapshot_path(&manager, paths, &backup)?;

            let restore = RestoreManager::new(paths.clone())?;
            let manifest = restore.validate(&archive_path)?;

            println!("Snapshot Information");
            println!("====================");
            println!("File: {}", archive_path.display());
            println!(
                "Created: {}",
                manifest.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if let Some(description) = &manifest.description {
                println!("Description: {}", description);
            }
            println!("Format version: {}", manifest.version);
            println!();

            if !force {
                println!("WARNING: Restore inserts every snapshot record into the store.");
                println!("It fails on a store that already holds conflicting ids.");
                println!("To proceed, run again with --force flag:");
                println!("  envmon backup restore {} --force", backup);
                return Ok(());
            }

            println!("Restoring from snapshot...");
            restore.restore(&archive_path)?;
            println!("Restore complete!");
        }

        BackupCommands::Info { backup } => {
            let archive_path = resolve_snapshot_path(&manager, paths, &backup)?;

            let restore = RestoreManager::new(paths.clone())?;
            let manifest = restore.validate(&archive_path)?;
            let metadata = std::fs::metadata(&archive_path)?;

            println!("Snapshot Details");
            println!("================");
            println!("File: {}", archive_path.display());
            println!("Size: {}", format_size(metadata.len()));
            println!(
                "Created: {}",
                manifest.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "Description: {}",
                manifest.description.as_deref().unwrap_or("(none)")
            );
            println!("Format version: {}", manifest.version);
        }

        BackupCommands::Delete { name } => {
            manager.delete_snapshot(&name)?;
            println!("Deleted snapshot: {}", name);
        }

        BackupCommands::Retention { days } => {
            let days = days.unwrap_or(settings.retention_days);
            let deleted = manager.apply_retention(days)?;

            if deleted.is_empty() {
                println!("No snapshots older than {} days.", days);
            } else {
                println!("Deleted {} snapshot(s) older than {} days:", deleted.len(), days);
                for name in deleted {
                    println!("  {}", name);
                }
            }
        }
    }

    Ok(())
}

/// Resolve a snapshot identifier to a full path
fn resolve_snapshot_path(
    manager: &SnapshotManager,
    paths: &EnvmonPaths,
    backup: &str,
) -> EnvmonResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .list_snapshots()?
            .into_iter()
            .next()
            .map(|name| manager.snapshot_path(&name))
            .ok_or_else(|| crate::error::EnvmonError::snapshot_not_found("latest"));
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    // Check if it's a filename in the backup directory
    let snapshot_path = paths.backup_dir().join(backup);
    if snapshot_path.exists() {
        return Ok(snapshot_path);
    }

    Err(crate::error::EnvmonError::snapshot_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    let months = days / 30;
    format!("{}mo", months)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
