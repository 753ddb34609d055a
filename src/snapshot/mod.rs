//! Snapshot pipeline for envmon-cli
//!
//! Creates point-in-time snapshots of the record store, restores from
//! them, and enforces the retention policy.
//!
//! # Architecture
//!
//! The pipeline consists of four components:
//!
//! - `codec`: serializes one entity kind to/from its self-describing
//!   record format
//! - `archive`: packages a staging directory into one zip archive (and
//!   back), with drop-guarded scratch cleanup
//! - `SnapshotManager`: creates, lists, and deletes snapshots, applies
//!   retention, and handles single-kind exports/imports
//! - `RestoreManager`: validates and replays snapshots
//!
//! # Snapshot Format
//!
//! A snapshot is a zip archive named `backup_<YYYYMMDD_HHMMSS>.zip`
//! containing one pretty-printed JSON record set per entity kind plus a
//! `metadata.json` manifest (creation time UTC, optional description,
//! format version "1.0").
//!
//! # Example
//!
//! ```rust,ignore
//! use envmon::config::paths::EnvmonPaths;
//! use envmon::snapshot::{RestoreManager, SnapshotManager};
//!
//! let paths = EnvmonPaths::new()?;
//! let manager = SnapshotManager::new(paths.clone())?;
//!
//! let archive_path = manager.create_snapshot(Some("pre-upgrade"))?;
//! manager.apply_retention(30)?;
//!
//! // Later, restore from the snapshot
//! let restore = RestoreManager::new(paths)?;
//! restore.restore(&archive_path)?;
//! ```

pub mod archive;
pub mod codec;
pub mod manager;
pub mod manifest;
pub mod restore;

pub use archive::ScratchDir;
pub use codec::EntityKind;
pub use manager::{parse_snapshot_timestamp, snapshot_file_name, SnapshotManager};
pub use manifest::{SnapshotManifest, FORMAT_VERSION, MANIFEST_FILE};
pub use restore::RestoreManager;
