//! Audit log entry model
//!
//! One free-text audit event recorded by the platform. Entries are
//! append-only; the snapshot pipeline exports and imports them like any
//! other entity kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique identifier
    pub id: i64,

    /// Event category (e.g., "DataBackup", "DataRestore", "RetentionPolicy")
    pub event_type: String,

    /// Free-text description of what happened
    pub description: String,

    /// The user who triggered the event; None for tool-initiated events
    pub user_id: Option<i64>,

    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        id: i64,
        event_type: impl Into<String>,
        description: impl Into<String>,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            event_type: event_type.into(),
            description: description.into(),
            user_id,
            timestamp: Utc::now(),
        }
    }
}
