use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::{CanonicalPoint, FieldValue};

/// Computed output columns, in the order they follow the metadata columns.
pub const COMPUTED_COLUMNS: [&str; 7] = [
    "lat_dd",
    "lon_dd",
    "lat_dms",
    "lon_dms",
    "easting_utm",
    "northing_utm",
    "zone_utm",
];

/// Result of the automatic UTM projection of a canonical point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    pub easting: f64,
    pub northing: f64,
    /// Zone number plus hemisphere letter, e.g. `48S`.
    pub zone_label: String,
}

/// One fully converted row: the canonical point fanned out into every
/// representation, plus the untouched metadata of the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub row_index: usize,
    pub metadata: Vec<(String, FieldValue)>,
    pub point: CanonicalPoint,
    pub lat_dms: String,
    pub lon_dms: String,
    /// `None` when the point lies outside the UTM domain.
    pub utm: Option<UtmCoordinate>,
}

impl EnrichedRecord {
    pub fn lat_dd(&self) -> f64 {
        self.point.lat_dd
    }

    pub fn lon_dd(&self) -> f64 {
        self.point.lon_dd
    }

    pub fn easting_utm(&self) -> Option<f64> {
        self.utm.as_ref().map(|u| u.easting)
    }

    pub fn northing_utm(&self) -> Option<f64> {
        self.utm.as_ref().map(|u| u.northing)
    }

    pub fn zone_utm(&self) -> Option<&str> {
        self.utm.as_ref().map(|u| u.zone_label.as_str())
    }

    pub fn metadata_value(&self, name: &str) -> Option<&FieldValue> {
        self.metadata
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Computed columns rendered as text; undefined UTM fields become `None`.
    pub fn computed_values(&self) -> [Option<String>; 7] {
        [
            Some(self.lat_dd().to_string()),
            Some(self.lon_dd().to_string()),
            Some(self.lat_dms.clone()),
            Some(self.lon_dms.clone()),
            self.easting_utm().map(|e| e.to_string()),
            self.northing_utm().map(|n| n.to_string()),
            self.zone_utm().map(str::to_string),
        ]
    }
}

#[derive(Default)]
pub struct EnrichedRecordBuilder {
    row_index: Option<usize>,
    metadata: Vec<(String, FieldValue)>,
    point: Option<CanonicalPoint>,
    lat_dms: Option<String>,
    lon_dms: Option<String>,
    utm: Option<UtmCoordinate>,
}

impl EnrichedRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_index(mut self, index: usize) -> Self {
        self.row_index = Some(index);
        self
    }

    pub fn metadata(mut self, metadata: Vec<(String, FieldValue)>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn point(mut self, point: CanonicalPoint) -> Self {
        self.point = Some(point);
        self
    }

    pub fn dms(mut self, lat_dms: String, lon_dms: String) -> Self {
        self.lat_dms = Some(lat_dms);
        self.lon_dms = Some(lon_dms);
        self
    }

    pub fn utm(mut self, utm: Option<UtmCoordinate>) -> Self {
        self.utm = utm;
        self
    }

    pub fn build(self) -> Result<EnrichedRecord> {
        Ok(EnrichedRecord {
            row_index: self
                .row_index
                .ok_or_else(|| ProcessingError::MissingData("row_index".to_string()))?,
            metadata: self.metadata,
            point: self
                .point
                .ok_or_else(|| ProcessingError::MissingData("point".to_string()))?,
            lat_dms: self
                .lat_dms
                .ok_or_else(|| ProcessingError::MissingData("lat_dms".to_string()))?,
            lon_dms: self
                .lon_dms
                .ok_or_else(|| ProcessingError::MissingData("lon_dms".to_string()))?,
            utm: self.utm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_point() -> CanonicalPoint {
        CanonicalPoint::new(106.827153, -6.175392).unwrap()
    }

    #[test]
    fn test_builder_pattern() {
        let record = EnrichedRecordBuilder::new()
            .row_index(3)
            .metadata(vec![("nama_lokasi".to_string(), FieldValue::from("Monas"))])
            .point(sample_point())
            .dms("lat".to_string(), "lon".to_string())
            .utm(Some(UtmCoordinate {
                easting: 702178.12,
                northing: 9317060.29,
                zone_label: "48S".to_string(),
            }))
            .build()
            .unwrap();

        assert_eq!(record.row_index, 3);
        assert_eq!(record.zone_utm(), Some("48S"));
        assert_eq!(
            record.metadata_value("nama_lokasi"),
            Some(&FieldValue::from("Monas"))
        );
    }

    #[test]
    fn test_builder_requires_point() {
        let result = EnrichedRecordBuilder::new()
            .row_index(0)
            .dms("a".to_string(), "b".to_string())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_undefined_utm_columns() {
        let record = EnrichedRecordBuilder::new()
            .row_index(0)
            .point(sample_point())
            .dms("a".to_string(), "b".to_string())
            .build()
            .unwrap();

        let values = record.computed_values();
        assert!(values[0].is_some());
        assert!(values[4].is_none());
        assert!(values[5].is_none());
        assert!(values[6].is_none());
    }
}
