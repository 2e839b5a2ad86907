use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessingError, Result};

/// How the `x` / `y` fields of the input rows are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputRepresentation {
    DecimalDegrees,
    Dms,
    Utm,
}

impl InputRepresentation {
    pub fn display_name(&self) -> &'static str {
        match self {
            InputRepresentation::DecimalDegrees => "Decimal Degrees (DD)",
            InputRepresentation::Dms => "Geographic (DMS)",
            InputRepresentation::Utm => "UTM",
        }
    }
}

impl FromStr for InputRepresentation {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dd" | "decimal" | "decimal-degrees" => Ok(InputRepresentation::DecimalDegrees),
            "dms" | "geographic" => Ok(InputRepresentation::Dms),
            "utm" => Ok(InputRepresentation::Utm),
            other => Err(ProcessingError::Configuration(format!(
                "Unsupported input representation: '{}' (expected dd, dms or utm)",
                other
            ))),
        }
    }
}

impl fmt::Display for InputRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datum {
    Wgs84,
    Dgn95,
}

impl Datum {
    pub fn name(&self) -> &'static str {
        match self {
            Datum::Wgs84 => "WGS84",
            Datum::Dgn95 => "DGN95",
        }
    }

    /// Inclusive UTM zone range accepted for this datum.
    pub fn zone_range(&self) -> (u8, u8) {
        match self {
            Datum::Wgs84 => (1, 60),
            Datum::Dgn95 => (46, 54),
        }
    }
}

impl FromStr for Datum {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "WGS84" => Ok(Datum::Wgs84),
            "DGN95" => Ok(Datum::Dgn95),
            _ => Err(ProcessingError::Configuration(format!(
                "Datum '{}' is not supported",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Latitude sign rule: the equator belongs to the north.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }
}

/// Datum, zone and hemisphere of projected UTM input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatumSpec {
    pub datum: Datum,
    pub zone: u8,
    pub hemisphere: Hemisphere,
}

impl DatumSpec {
    pub fn new(datum: Datum, zone: u8, hemisphere: Hemisphere) -> Self {
        Self {
            datum,
            zone,
            hemisphere,
        }
    }

    /// Build from a zone string such as `48S` or `50n`.
    pub fn from_zone_str(datum: Datum, zone: &str) -> Result<Self> {
        let (zone, hemisphere) = parse_zone(zone)?;
        Ok(Self::new(datum, zone, hemisphere))
    }

    pub fn zone_label(&self) -> String {
        format!("{}{}", self.zone, self.hemisphere.letter())
    }
}

impl fmt::Display for DatumSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / UTM zone {}", self.datum, self.zone_label())
    }
}

/// Split `<1-60><N|S>` into its zone number and hemisphere.
pub fn parse_zone(zone: &str) -> Result<(u8, Hemisphere)> {
    let trimmed = zone.trim();
    let invalid = || {
        ProcessingError::Configuration(format!(
            "Invalid UTM zone '{}'. Expected format: '<1-60><N|S>', e.g. '48S'",
            zone
        ))
    };

    let last = trimmed.chars().last().ok_or_else(invalid)?;
    let hemisphere = Hemisphere::from_letter(last).ok_or_else(invalid)?;
    let number = trimmed[..trimmed.len() - last.len_utf8()]
        .trim()
        .parse::<u8>()
        .map_err(|_| invalid())?;

    if !(1..=60).contains(&number) {
        return Err(invalid());
    }

    Ok((number, hemisphere))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zone() {
        assert_eq!(parse_zone("48S").unwrap(), (48, Hemisphere::South));
        assert_eq!(parse_zone(" 50n ").unwrap(), (50, Hemisphere::North));
        assert_eq!(parse_zone("1N").unwrap(), (1, Hemisphere::North));
    }

    #[test]
    fn test_parse_zone_rejects_malformed() {
        for bad in ["", "S", "48", "48X", "0N", "61S", "abcS"] {
            let err = parse_zone(bad).unwrap_err();
            assert!(err.is_configuration(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_datum_parsing() {
        assert_eq!("wgs84".parse::<Datum>().unwrap(), Datum::Wgs84);
        assert_eq!("WGS 84".parse::<Datum>().unwrap(), Datum::Wgs84);
        assert_eq!("dgn-95".parse::<Datum>().unwrap(), Datum::Dgn95);
        assert!("NAD83".parse::<Datum>().is_err());
    }

    #[test]
    fn test_representation_parsing() {
        assert_eq!(
            "DD".parse::<InputRepresentation>().unwrap(),
            InputRepresentation::DecimalDegrees
        );
        assert_eq!(
            "dms".parse::<InputRepresentation>().unwrap(),
            InputRepresentation::Dms
        );
        assert_eq!(
            "utm".parse::<InputRepresentation>().unwrap(),
            InputRepresentation::Utm
        );
        assert!("mgrs".parse::<InputRepresentation>().is_err());
    }

    #[test]
    fn test_hemisphere_from_latitude() {
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(-0.0001), Hemisphere::South);
    }

    #[test]
    fn test_datum_spec_label() {
        let spec = DatumSpec::from_zone_str(Datum::Dgn95, "50s").unwrap();
        assert_eq!(spec.zone_label(), "50S");
        assert_eq!(spec.to_string(), "DGN95 / UTM zone 50S");
    }
}
