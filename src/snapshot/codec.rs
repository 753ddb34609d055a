//! Entity record-set codec
//!
//! Serializes and deserializes one entity kind to and from its
//! self-describing record format: a pretty-printed JSON array with named
//! fields, human-inspectable and stable across snapshots sharing the same
//! manifest version tag.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::error::{EnvmonError, EnvmonResult};

/// The entity kinds handled by the snapshot pipeline
///
/// `REPLAY_ORDER` is also the export order. Maintenance entries reference
/// sensors by id, so sensors must be replayed first on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Users,
    Sensors,
    AuditLogs,
    MaintenanceSchedule,
}

impl EntityKind {
    /// Fixed export and replay order
    pub const REPLAY_ORDER: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Sensors,
        EntityKind::AuditLogs,
        EntityKind::MaintenanceSchedule,
    ];

    /// The selector string used on the command line and in export names
    pub fn selector(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Sensors => "sensors",
            EntityKind::AuditLogs => "audit_logs",
            EntityKind::MaintenanceSchedule => "maintenance_schedule",
        }
    }

    /// The record-set file name inside a snapshot archive
    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Users => "users.json",
            EntityKind::Sensors => "sensors.json",
            EntityKind::AuditLogs => "audit_logs.json",
            EntityKind::MaintenanceSchedule => "maintenance_schedule.json",
        }
    }

    /// Parse a selector string
    pub fn parse(s: &str) -> EnvmonResult<Self> {
        match s.to_lowercase().as_str() {
            "users" => Ok(EntityKind::Users),
            "sensors" => Ok(EntityKind::Sensors),
            "audit_logs" => Ok(EntityKind::AuditLogs),
            "maintenance_schedule" => Ok(EntityKind::MaintenanceSchedule),
            other => Err(EnvmonError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

/// Encode a record set as pretty-printed JSON
pub fn encode_records<T: Serialize>(records: &[T]) -> EnvmonResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| EnvmonError::Json(format!("Failed to encode record set: {}", e)))
}

/// Decode a record set from JSON
pub fn decode_records<T: DeserializeOwned>(json: &str) -> EnvmonResult<Vec<T>> {
    serde_json::from_str(json)
        .map_err(|e| EnvmonError::Json(format!("Failed to decode record set: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditLogEntry, MaintenanceEntry, Role, Sensor, User};
    use chrono::Utc;

    #[test]
    fn test_replay_order_is_fixed() {
        assert_eq!(EntityKind::REPLAY_ORDER[0], EntityKind::Users);
        assert_eq!(EntityKind::REPLAY_ORDER[1], EntityKind::Sensors);
        assert_eq!(EntityKind::REPLAY_ORDER[2], EntityKind::AuditLogs);
        assert_eq!(
            EntityKind::REPLAY_ORDER[3],
            EntityKind::MaintenanceSchedule
        );
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(EntityKind::parse("users").unwrap(), EntityKind::Users);
        assert_eq!(
            EntityKind::parse("MAINTENANCE_SCHEDULE").unwrap(),
            EntityKind::MaintenanceSchedule
        );

        let err = EntityKind::parse("firmware").unwrap_err();
        assert!(matches!(err, EnvmonError::UnknownKind(_)));
    }

    #[test]
    fn test_user_round_trip() {
        let role = Role {
            id: 1,
            name: "Administrator".to_string(),
            description: "Full access".to_string(),
        };
        let mut with_login = User::new(1, "kai", "kai@example.com", "hash", role.clone());
        with_login.last_login_at = Some(Utc::now());
        let without_login = User::new(2, "robin", "robin@example.com", "hash", role);

        let records = vec![with_login, without_login];
        let encoded = encode_records(&records).unwrap();
        let decoded: Vec<User> = decode_records(&encoded).unwrap();

        assert_eq!(records, decoded);
    }

    #[test]
    fn test_sensor_round_trip() {
        let mut serviced = Sensor::new(1, "Gauge", "water_level", "Bridge 4");
        serviced.last_maintenance = Some(Utc::now());
        let records = vec![serviced, Sensor::new(2, "Monitor", "air_quality", "Rooftop")];

        let encoded = encode_records(&records).unwrap();
        let decoded: Vec<Sensor> = decode_records(&encoded).unwrap();

        assert_eq!(records, decoded);
    }

    #[test]
    fn test_audit_log_round_trip() {
        let records = vec![
            AuditLogEntry::new(1, "Login", "User kai logged in", Some(1)),
            AuditLogEntry::new(2, "DataBackup", "Created backup", None),
        ];

        let encoded = encode_records(&records).unwrap();
        let decoded: Vec<AuditLogEntry> = decode_records(&encoded).unwrap();

        assert_eq!(records, decoded);
    }

    #[test]
    fn test_maintenance_round_trip() {
        let records = vec![MaintenanceEntry::new(1, 42, "Gauge", Utc::now())];

        let encoded = encode_records(&records).unwrap();
        let decoded: Vec<MaintenanceEntry> = decode_records(&encoded).unwrap();

        assert_eq!(records, decoded);
    }

    #[test]
    fn test_empty_record_set_round_trip() {
        let records: Vec<Sensor> = Vec::new();
        let encoded = encode_records(&records).unwrap();
        let decoded: Vec<Sensor> = decode_records(&encoded).unwrap();

        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encoding_is_field_named() {
        let records = vec![Sensor::new(1, "Gauge", "water_level", "Bridge 4")];
        let encoded = encode_records(&records).unwrap();

        assert!(encoded.contains("\"sensor_type\""));
        assert!(encoded.contains("\"firmware_version\""));
    }
}
