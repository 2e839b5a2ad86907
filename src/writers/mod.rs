pub mod csv_writer;
pub mod geojson_writer;
pub mod parquet_writer;

pub use csv_writer::CsvWriter;
pub use geojson_writer::GeoJsonWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};

use crate::error::{ProcessingError, Result};
use crate::models::EnrichedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    GeoJson,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::GeoJson => "geojson",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "geojson" | "json" => Ok(OutputFormat::GeoJson),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(ProcessingError::Configuration(format!(
                "Unsupported output format: '{}' (expected csv, geojson or parquet)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Metadata column names across all records, in first-seen order.
pub fn metadata_columns(records: &[EnrichedRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for (name, _) in &record.metadata {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}
