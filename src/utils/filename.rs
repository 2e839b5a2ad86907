use crate::utils::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_STEM};
use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;

/// Default output path: `output/konversi-koordinat-{YYMMDD}.{ext}` for today.
pub fn default_output_filename(extension: &str) -> PathBuf {
    output_filename_for_date(Local::now().date_naive(), extension)
}

pub fn output_filename_for_date(date: NaiveDate, extension: &str) -> PathBuf {
    let filename = format!(
        "{}-{:02}{:02}{:02}.{}",
        DEFAULT_OUTPUT_STEM,
        date.year() % 100,
        date.month(),
        date.day(),
        extension
    );
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename_for_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let path = output_filename_for_date(date, "csv");
        assert_eq!(path, PathBuf::from("output").join("konversi-koordinat-240307.csv"));
    }

    #[test]
    fn test_default_output_filename() {
        let filename = default_output_filename("geojson");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output"));
        assert!(filename_str.ends_with(".geojson"));

        let file_part = filename.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_part.starts_with("konversi-koordinat-"));
        // konversi-koordinat- + YYMMDD + .geojson
        assert_eq!(file_part.len(), "konversi-koordinat-".len() + 6 + ".geojson".len());
    }
}
