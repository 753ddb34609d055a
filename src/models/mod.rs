//! Core data models for envmon-cli
//!
//! Defines the entity kinds handled by the snapshot pipeline: users (with
//! their embedded role), sensors, audit log entries, and maintenance
//! schedule entries. All models serialize to self-describing JSON and
//! round-trip losslessly, including optional timestamps.

pub mod audit_log;
pub mod maintenance;
pub mod sensor;
pub mod user;

pub use audit_log::AuditLogEntry;
pub use maintenance::MaintenanceEntry;
pub use sensor::Sensor;
pub use user::{Role, User};
