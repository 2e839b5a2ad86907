use crate::error::{ProcessingError, Result};
use crate::models::{FieldValue, RawRecord, X_FIELD, Y_FIELD};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads coordinate tables from delimited text files.
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read all rows of a CSV file; every cell is kept as text
    pub fn read_records(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let bytes = fs::read(path)?;
        let text = decode(&bytes);
        let records = self.read_from_str(&text)?;

        debug!(path = %path.display(), rows = records.len(), "Read CSV input");
        Ok(records)
    }

    /// Parse CSV text with a header row. Header names are lowercased.
    pub fn read_from_str(&self, text: &str) -> Result<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        for required in [X_FIELD, Y_FIELD] {
            if !headers.iter().any(|h| h == required) {
                return Err(ProcessingError::InvalidFormat(format!(
                    "CSV input must have '{}' and '{}' columns (found: {})",
                    X_FIELD,
                    Y_FIELD,
                    headers.join(", ")
                )));
            }
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let record: RawRecord = headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.clone(), FieldValue::Text(value.to_string())))
                .collect();
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes: honour a BOM, accept UTF-8, otherwise fall back to Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text;
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            debug!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_records_with_metadata() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "X,Y,nama_lokasi")?;
        writeln!(temp_file, "106.827153,-6.175392,Monas")?;
        writeln!(temp_file, "106.828111,-6.176333,Stasiun Gambir")?;
        writeln!(temp_file, "703000.12,9317000.45,Titik UTM")?;

        let records = CsvReader::new().read_records(temp_file.path())?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].x(), Some(&FieldValue::from("106.827153")));
        assert_eq!(
            records[1].get("nama_lokasi"),
            Some(&FieldValue::from("Stasiun Gambir"))
        );
        assert_eq!(records[2].metadata().len(), 1);

        Ok(())
    }

    #[test]
    fn test_missing_coordinate_columns() {
        let result = CsvReader::new().read_from_str("lon,lat\n1,2\n");
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_utf8_bom_and_semicolon_delimiter() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"\xEF\xBB\xBFx;y;name\n106 49 37 BT;6 10 30 LS;Titik\n")?;

        let records = CsvReader::with_delimiter(b';').read_records(temp_file.path())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].x(), Some(&FieldValue::from("106 49 37 BT")));

        Ok(())
    }

    #[test]
    fn test_windows_1252_fallback() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        // 0xB0 is the degree sign in Windows-1252
        temp_file.write_all(b"x,y\n106\xB049,6\xB010 LS\n")?;

        let records = CsvReader::new().read_records(temp_file.path())?;
        assert_eq!(records[0].x(), Some(&FieldValue::from("106°49")));

        Ok(())
    }
}
