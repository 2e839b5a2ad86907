use crate::error::{ProcessingError, Result};
use crate::models::FieldValue;

/// Which geographic axis a value belongs to; selects the hemisphere letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Lat,
    Lon,
}

/// Indonesian hemisphere words and abbreviations, applied in order.
const HEMISPHERE_ALIASES: [(&str, &str); 8] = [
    ("LU", "N"),
    ("LS", "S"),
    ("UTARA", "N"),
    ("SELATAN", "S"),
    ("BT", "E"),
    ("BB", "W"),
    ("TIMUR", "E"),
    ("BARAT", "W"),
];

/// Sexagesimal unit marks, treated as token separators.
const UNIT_MARKS: [char; 6] = ['°', 'º', '\'', '"', '′', '″'];

/// Convert free-form DMS text to decimal degrees
///
/// Accepts `deg [min [sec]]` with N/S/E/W or the Indonesian LU/LS/BT/BB
/// (and Utara/Selatan/Timur/Barat) hemisphere markers.
///
/// # Examples
/// ```
/// use coordinate_processor::utils::parse_dms;
///
/// let lat = parse_dms("6 10 30 LS").unwrap();
/// assert!((lat - -6.175).abs() < 1e-9);
/// ```
pub fn parse_dms(text: &str) -> Result<f64> {
    let mut normalized = text.trim().to_uppercase();
    for (alias, letter) in HEMISPHERE_ALIASES {
        normalized = normalized.replace(alias, letter);
    }

    let southern_or_western = normalized.contains('S') || normalized.contains('W');

    let cleaned: String = normalized
        .chars()
        .map(|c| if UNIT_MARKS.contains(&c) { ' ' } else { c })
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || *c == '.' || *c == '-')
        .collect();

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 3 {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Invalid DMS format: '{}'. Expected 'deg [min [sec]] [hemisphere]'",
            text
        )));
    }

    let parse_token = |token: &str, name: &str| {
        token.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidCoordinate(format!(
                "Invalid {} value '{}' in '{}'",
                name, token, text
            ))
        })
    };

    let degrees = parse_token(tokens[0], "degrees")?;
    let minutes = tokens
        .get(1)
        .map(|t| parse_token(*t, "minutes"))
        .transpose()?
        .unwrap_or(0.0);
    let seconds = tokens
        .get(2)
        .map(|t| parse_token(*t, "seconds"))
        .transpose()?
        .unwrap_or(0.0);

    let decimal_value = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    if !decimal_value.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "DMS value '{}' is not finite",
            text
        )));
    }

    // A leading minus on the degree token counts even for "-0".
    if southern_or_western || tokens[0].starts_with('-') {
        Ok(-decimal_value)
    } else {
        Ok(decimal_value)
    }
}

/// DMS parsing for a loosely typed cell; numeric cells are not DMS text.
pub fn parse_dms_field(value: &FieldValue) -> Result<f64> {
    match value {
        FieldValue::Text(text) => parse_dms(text),
        FieldValue::Number(n) => Err(ProcessingError::InvalidCoordinate(format!(
            "Expected DMS text, got number {}",
            n
        ))),
    }
}

/// Decimal degree coercion for a loosely typed cell.
pub fn parse_decimal_field(value: &FieldValue) -> Result<f64> {
    value.to_number().ok_or_else(|| {
        ProcessingError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", value))
    })
}

/// Convert decimal degrees to a DMS display string such as `6° 10' 30.0000" S (LS)`
///
/// Seconds are rounded to four decimals; a rounded value of 60 carries into
/// the minutes.
pub fn format_dms(decimal: f64, axis: Axis) -> String {
    let is_negative = decimal < 0.0;
    let abs_decimal = decimal.abs();

    let mut degrees = abs_decimal.trunc() as u32;
    let minutes_decimal = (abs_decimal - degrees as f64) * 60.0;
    let mut minutes = minutes_decimal.trunc() as u32;
    let mut seconds = round_to((minutes_decimal - minutes as f64) * 60.0, 4);

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }

    let direction = match (axis, is_negative) {
        (Axis::Lat, true) => "S (LS)",
        (Axis::Lat, false) => "N (LU)",
        (Axis::Lon, true) => "W (BB)",
        (Axis::Lon, false) => "E (BT)",
    };

    format!("{}° {}' {:.4}\" {}", degrees, minutes, seconds, direction)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
