//! Maintenance schedule entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled maintenance visit for one sensor
///
/// `sensor_id` references a [`Sensor`](super::Sensor) record. The reference
/// is not validated at export time; the store enforces it on insert, which
/// is why sensors must be replayed before maintenance entries on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    /// Unique identifier
    pub id: i64,

    /// The sensor this visit services
    pub sensor_id: i64,

    /// Sensor name, denormalized for display
    pub sensor_name: String,

    /// When the visit is scheduled
    pub scheduled_date: DateTime<Utc>,

    /// Visit status (e.g., "Scheduled", "Completed", "Overdue")
    pub status: String,
}

impl MaintenanceEntry {
    /// Create a new scheduled entry
    pub fn new(
        id: i64,
        sensor_id: i64,
        sensor_name: impl Into<String>,
        scheduled_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sensor_id,
            sensor_name: sensor_name.into(),
            scheduled_date,
            status: "Scheduled".to_string(),
        }
    }
}
