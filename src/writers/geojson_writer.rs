use crate::error::Result;
use crate::models::{EnrichedRecord, FieldValue};
use crate::writers::metadata_columns;
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::Path;

/// Writes a GeoJSON FeatureCollection with one Point feature per record.
///
/// Geometry is always WGS84 `[lon, lat]`. Every output column lands in the
/// feature properties; undefined values are written as `null`.
pub struct GeoJsonWriter {
    pretty: bool,
}

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_records(&self, records: &[EnrichedRecord], path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(records, std::io::BufWriter::new(file))
    }

    pub fn write_to<W: Write>(&self, records: &[EnrichedRecord], mut output: W) -> Result<()> {
        let collection = self.to_feature_collection(records);
        if self.pretty {
            serde_json::to_writer_pretty(&mut output, &collection)?;
        } else {
            serde_json::to_writer(&mut output, &collection)?;
        }
        output.flush()?;
        Ok(())
    }

    pub fn to_feature_collection(&self, records: &[EnrichedRecord]) -> Value {
        let meta_columns = metadata_columns(records);
        let features: Vec<Value> = records
            .iter()
            .map(|record| feature(record, &meta_columns))
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn feature(record: &EnrichedRecord, meta_columns: &[String]) -> Value {
    let mut properties = Map::new();

    for name in meta_columns {
        let value = match record.metadata_value(name) {
            Some(FieldValue::Number(n)) => json!(n),
            Some(FieldValue::Text(s)) => Value::String(s.clone()),
            None => Value::Null,
        };
        properties.insert(name.clone(), value);
    }

    properties.insert("lat_dd".into(), json!(record.lat_dd()));
    properties.insert("lon_dd".into(), json!(record.lon_dd()));
    properties.insert("lat_dms".into(), json!(record.lat_dms));
    properties.insert("lon_dms".into(), json!(record.lon_dms));
    properties.insert("easting_utm".into(), json!(record.easting_utm()));
    properties.insert("northing_utm".into(), json!(record.northing_utm()));
    properties.insert("zone_utm".into(), json!(record.zone_utm()));

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [record.lon_dd(), record.lat_dd()],
        },
        "properties": properties,
    })
}
