use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProcessingError, Result};

/// Reserved field holding longitude / easting.
pub const X_FIELD: &str = "x";
/// Reserved field holding latitude / northing.
pub const Y_FIELD: &str = "y";

/// A loosely typed cell value as delivered by the row source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric coercion: numbers pass through, text is trimmed and parsed.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// One input row: ordered field name → value pairs.
///
/// Only `x` and `y` (matched case-insensitively) carry meaning; every other
/// field is metadata that is handed through untouched and in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, replacing the value of an existing field with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn x(&self) -> Option<&FieldValue> {
        self.get(X_FIELD)
    }

    pub fn y(&self) -> Option<&FieldValue> {
        self.get(Y_FIELD)
    }

    /// Fail unless both reserved coordinate fields exist.
    pub fn require_coordinates(&self) -> Result<(&FieldValue, &FieldValue)> {
        match (self.x(), self.y()) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(ProcessingError::MissingData(
                "row must contain 'x' and 'y' fields".to_string(),
            )),
        }
    }

    /// All fields other than `x` / `y`, in input order.
    pub fn metadata(&self) -> Vec<(String, FieldValue)> {
        self.fields
            .iter()
            .filter(|(n, _)| !is_reserved(n))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

pub fn is_reserved(name: &str) -> bool {
    name.eq_ignore_ascii_case(X_FIELD) || name.eq_ignore_ascii_case(Y_FIELD)
}
