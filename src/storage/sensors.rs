//! Sensor repository for JSON storage

use std::path::PathBuf;

use crate::error::{EnvmonError, EnvmonResult};
use crate::models::Sensor;

use super::file_io::{read_json, write_json_atomic};

/// Serializable sensor record file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SensorData {
    sensors: Vec<Sensor>,
}

/// Repository for sensor persistence
#[derive(Debug, Clone)]
pub struct SensorRepository {
    path: PathBuf,
}

impl SensorRepository {
    /// Create a new sensor repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get all sensors in insertion order
    pub fn get_all(&self) -> EnvmonResult<Vec<Sensor>> {
        let data: SensorData = read_json(&self.path)?;
        Ok(data.sensors)
    }

    /// Insert a sensor, keeping its id
    ///
    /// Fails with a conflict error if a sensor with the same id already
    /// exists.
    pub fn insert(&self, sensor: Sensor) -> EnvmonResult<()> {
        let mut data: SensorData = read_json(&self.path)?;

        if data.sensors.iter().any(|s| s.id == sensor.id) {
            return Err(EnvmonError::conflict("Sensor", sensor.id));
        }

        data.sensors.push(sensor);
        write_json_atomic(&self.path, &data)
    }

    /// Check whether a sensor with the given id exists
    pub fn exists(&self, id: i64) -> EnvmonResult<bool> {
        Ok(self.get_all()?.iter().any(|s| s.id == id))
    }

    /// Number of stored sensors
    pub fn count(&self) -> EnvmonResult<usize> {
        Ok(self.get_all()?.len())
    }
}
