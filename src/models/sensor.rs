//! Sensor model
//!
//! Represents one deployed environmental sensor (weather station, water
//! quality probe, air quality monitor).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deployed environmental sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Unique identifier
    pub id: i64,

    /// Sensor name (e.g., "River Gauge North")
    pub name: String,

    /// Kind of measurement the sensor takes (e.g., "temperature", "ph")
    pub sensor_type: String,

    /// Physical deployment location
    pub location: String,

    /// Current operational status (e.g., "Active", "Fault")
    pub status: String,

    /// When the sensor was last serviced, if ever
    pub last_maintenance: Option<DateTime<Utc>>,

    /// Installed firmware version
    pub firmware_version: String,

    /// Free-form configuration blob pushed to the device
    pub configuration: String,

    /// Whether the sensor is currently reporting
    pub is_active: bool,

    /// When the sensor was registered
    pub created_at: DateTime<Utc>,

    /// When the sensor record was last modified
    pub last_updated: DateTime<Utc>,
}

impl Sensor {
    /// Create a new active sensor record
    pub fn new(
        id: i64,
        name: impl Into<String>,
        sensor_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            sensor_type: sensor_type.into(),
            location: location.into(),
            status: "Active".to_string(),
            last_maintenance: None,
            firmware_version: "1.0.0".to_string(),
            configuration: String::new(),
            is_active: true,
            created_at: now,
            last_updated: now,
        }
    }
}
