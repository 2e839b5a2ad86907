pub mod csv_reader;
pub mod json_reader;

pub use csv_reader::CsvReader;
pub use json_reader::JsonReader;

use crate::error::Result;
use crate::models::RawRecord;
use std::path::Path;

/// Read an input table, choosing the reader from the file extension.
///
/// `.json` files go through [`JsonReader`]; everything else is treated as CSV.
pub fn read_input(path: &Path) -> Result<Vec<RawRecord>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        JsonReader::new().read_records(path)
    } else {
        CsvReader::new().read_records(path)
    }
}
