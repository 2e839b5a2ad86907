use crate::error::Result;
use crate::models::{EnrichedRecord, COMPUTED_COLUMNS};
use crate::writers::metadata_columns;
use std::io::Write;
use std::path::Path;

/// Writes enriched records as CSV: metadata columns first, then the computed ones.
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_records(&self, records: &[EnrichedRecord], path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(records, file)
    }

    pub fn write_to<W: Write>(&self, records: &[EnrichedRecord], output: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);

        let meta_columns = metadata_columns(records);

        let header: Vec<&str> = meta_columns
            .iter()
            .map(String::as_str)
            .chain(COMPUTED_COLUMNS.iter().copied())
            .collect();
        writer.write_record(&header)?;

        for record in records {
            let mut row: Vec<String> = meta_columns
                .iter()
                .map(|name| {
                    record
                        .metadata_value(name)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                })
                .collect();
            row.extend(
                record
                    .computed_values()
                    .into_iter()
                    .map(Option::unwrap_or_default),
            );
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
