//! envmon-cli - Terminal-based administration tool for an environmental
//! sensor monitoring platform
//!
//! This library provides the data lifecycle pipeline behind the tool:
//! point-in-time snapshots of the record store, restore, retention
//! enforcement, and ingestion of external spreadsheet data into
//! auto-provisioned tables.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core entity models (users, sensors, audit log entries,
//!   maintenance entries)
//! - `storage`: JSON file record store with scoped per-operation access
//! - `audit`: Audit event recording
//! - `snapshot`: Snapshot creation, restore, and retention
//! - `ingest`: Spreadsheet ingestion into data tables
//! - `cli`: Command handlers for the `envmon` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use envmon::config::{paths::EnvmonPaths, settings::Settings};
//! use envmon::snapshot::SnapshotManager;
//!
//! let paths = EnvmonPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//!
//! let manager = SnapshotManager::new(paths)?;
//! let archive = manager.create_snapshot(Some("pre-upgrade"))?;
//! manager.apply_retention(settings.retention_days)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod snapshot;
pub mod storage;

pub use error::EnvmonError;
