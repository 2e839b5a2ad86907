use crate::error::{ProcessingError, Result};
use crate::models::{FieldValue, RawRecord};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads a JSON array of row objects.
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let text = fs::read_to_string(path)?;
        self.read_from_str(&text)
    }

    pub fn read_from_str(&self, text: &str) -> Result<Vec<RawRecord>> {
        let value: Value = serde_json::from_str(text)?;
        let rows = value.as_array().ok_or_else(|| {
            ProcessingError::InvalidFormat("JSON input must be an array of objects".to_string())
        })?;

        rows.iter()
            .enumerate()
            .map(|(index, row)| -> Result<RawRecord> {
                let object = row.as_object().ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!("Row {} is not a JSON object", index + 1))
                })?;

                Ok(object
                    .iter()
                    .map(|(name, value)| (name.clone(), to_field_value(value)))
                    .collect())
            })
            .collect()
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

fn to_field_value(value: &Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) => FieldValue::Number(f),
            None => FieldValue::Text(n.to_string()),
        },
        other => FieldValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_value_types() -> Result<()> {
        let records = JsonReader::new().read_from_str(
            r#"[
                {"x": 106.827153, "y": "-6.175392", "id": 1, "active": true},
                {"X": "106 49 37 BT", "Y": "6 10 30 LS", "note": null}
            ]"#,
        )?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].x(), Some(&FieldValue::Number(106.827153)));
        assert_eq!(records[0].get("active"), Some(&FieldValue::from("true")));
        assert_eq!(records[1].y(), Some(&FieldValue::from("6 10 30 LS")));
        assert_eq!(records[1].get("note"), Some(&FieldValue::from("null")));

        Ok(())
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(JsonReader::new().read_from_str(r#"{"x": 1}"#).is_err());
        assert!(JsonReader::new().read_from_str(r#"[1, 2]"#).is_err());
    }
}
