//! Ingestion data kinds and their fixed column schemas

use std::fmt;

use crate::error::{EnvmonError, EnvmonResult};

/// How a cell in one column is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Parsed as a UTC timestamp
    Timestamp,
    /// Parsed as a decimal number
    Decimal,
    /// Taken verbatim
    Text,
}

/// One column of a destination table schema
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Column name in the destination table
    pub name: &'static str,
    /// How cells in this column are parsed
    pub cell_type: CellType,
}

const fn col(name: &'static str, cell_type: CellType) -> Column {
    Column { name, cell_type }
}

use CellType::{Decimal, Text, Timestamp};

const WEATHER_COLUMNS: &[Column] = &[
    col("timestamp", Timestamp),
    col("temperature", Decimal),
    col("humidity", Decimal),
    col("wind_speed", Decimal),
    col("wind_direction", Text),
    col("precipitation", Decimal),
    col("location", Text),
];

const WATER_QUALITY_COLUMNS: &[Column] = &[
    col("timestamp", Timestamp),
    col("ph", Decimal),
    col("dissolved_oxygen", Decimal),
    col("temperature", Decimal),
    col("turbidity", Decimal),
    col("conductivity", Decimal),
    col("location", Text),
];

const AIR_QUALITY_COLUMNS: &[Column] = &[
    col("timestamp", Timestamp),
    col("pm25", Decimal),
    col("pm10", Decimal),
    col("no2", Decimal),
    col("o3", Decimal),
    col("so2", Decimal),
    col("co", Decimal),
    col("location", Text),
];

const METADATA_COLUMNS: &[Column] = &[
    col("sensor_id", Text),
    col("location", Text),
    col("latitude", Decimal),
    col("longitude", Decimal),
    col("installation_date", Timestamp),
    col("last_maintenance_date", Timestamp),
    col("sensor_type", Text),
    col("manufacturer", Text),
    col("model", Text),
];

/// The data kinds accepted by spreadsheet ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Weather,
    WaterQuality,
    AirQuality,
    Metadata,
}

impl DataKind {
    /// All recognized data kinds
    pub const ALL: [DataKind; 4] = [
        DataKind::Weather,
        DataKind::WaterQuality,
        DataKind::AirQuality,
        DataKind::Metadata,
    ];

    /// The selector string used on the command line
    pub fn selector(&self) -> &'static str {
        match self {
            DataKind::Weather => "weather",
            DataKind::WaterQuality => "water_quality",
            DataKind::AirQuality => "air_quality",
            DataKind::Metadata => "metadata",
        }
    }

    /// The destination table name
    pub fn table_name(&self) -> &'static str {
        match self {
            DataKind::Weather => "weather_data",
            DataKind::WaterQuality => "water_quality_data",
            DataKind::AirQuality => "air_quality_data",
            DataKind::Metadata => "sensor_metadata",
        }
    }

    /// The fixed column schema for this kind
    pub fn columns(&self) -> &'static [Column] {
        match self {
            DataKind::Weather => WEATHER_COLUMNS,
            DataKind::WaterQuality => WATER_QUALITY_COLUMNS,
            DataKind::AirQuality => AIR_QUALITY_COLUMNS,
            DataKind::Metadata => METADATA_COLUMNS,
        }
    }

    /// Parse a selector string
    pub fn parse(s: &str) -> EnvmonResult<Self> {
        match s.to_lowercase().as_str() {
            "weather" => Ok(DataKind::Weather),
            "water_quality" => Ok(DataKind::WaterQuality),
            "air_quality" => Ok(DataKind::AirQuality),
            "metadata" => Ok(DataKind::Metadata),
            other => Err(EnvmonError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!(DataKind::parse("weather").unwrap(), DataKind::Weather);
        assert_eq!(
            DataKind::parse("Water_Quality").unwrap(),
            DataKind::WaterQuality
        );

        let err = DataKind::parse("pollen").unwrap_err();
        assert!(matches!(err, EnvmonError::UnknownKind(_)));
    }

    #[test]
    fn test_weather_schema() {
        let columns = DataKind::Weather.columns();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0].name, "timestamp");
        assert_eq!(columns[0].cell_type, CellType::Timestamp);
        assert_eq!(columns[4].name, "wind_direction");
        assert_eq!(columns[4].cell_type, CellType::Text);
    }

    #[test]
    fn test_every_kind_has_a_distinct_table() {
        let names: Vec<_> = DataKind::ALL.iter().map(|k| k.table_name()).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}
