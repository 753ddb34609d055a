//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod data;

pub use backup::{handle_backup_command, BackupCommands};
pub use data::{handle_data_command, DataCommands};
