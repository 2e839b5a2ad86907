use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProcessingError, Result};
use crate::models::{Datum, DatumSpec, Hemisphere};
use crate::projection::{Ellipsoid, GeocentricTranslation, TransverseMercator};
use crate::utils::constants::{
    EPSG_WGS84_UTM_NORTH_BASE, EPSG_WGS84_UTM_SOUTH_BASE, ID74_TO_WGS84, UTM_ZONE_COUNT,
};

/// DGN95 / UTM codes, northern hemisphere: (zone, EPSG).
const DGN95_UTM_NORTH: [(u8, u32); 9] = [
    (46, 23846),
    (47, 23847),
    (48, 23848),
    (49, 23849),
    (50, 23850),
    (51, 23851),
    (52, 23852),
    (53, 23853),
    (54, 23854),
];

/// DGN95 / UTM codes, southern hemisphere: (zone, EPSG).
///
/// Zone 50S is 23890, below its neighbours. This is the registered
/// historical code and must stay as it is.
const DGN95_UTM_SOUTH: [(u8, u32); 9] = [
    (46, 23896),
    (47, 23897),
    (48, 23898),
    (49, 23899),
    (50, 23890),
    (51, 23891),
    (52, 23892),
    (53, 23893),
    (54, 23894),
];

/// EPSG identifier of a projected coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectedCrsId(pub u32);

impl ProjectedCrsId {
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Full definition of a code this resolver can produce.
    pub fn definition(&self) -> Result<ProjectedCrs> {
        ProjectedCrs::from_epsg(*self)
    }
}

impl fmt::Display for ProjectedCrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Resolve the projected CRS for UTM input on the given datum, zone and hemisphere.
pub fn resolve_epsg(datum: Datum, zone: u8, hemisphere: Hemisphere) -> Result<ProjectedCrsId> {
    let (min_zone, max_zone) = datum.zone_range();

    match datum {
        Datum::Wgs84 => {
            if !(min_zone..=max_zone).contains(&zone) {
                return Err(ProcessingError::Configuration(format!(
                    "WGS84 UTM zone must be between {} and {}, got {}",
                    min_zone, max_zone, zone
                )));
            }
            let base = match hemisphere {
                Hemisphere::North => EPSG_WGS84_UTM_NORTH_BASE,
                Hemisphere::South => EPSG_WGS84_UTM_SOUTH_BASE,
            };
            Ok(ProjectedCrsId(base + zone as u32))
        }
        Datum::Dgn95 => {
            let table = match hemisphere {
                Hemisphere::North => &DGN95_UTM_NORTH,
                Hemisphere::South => &DGN95_UTM_SOUTH,
            };
            table
                .iter()
                .find(|(z, _)| *z == zone)
                .map(|(_, code)| ProjectedCrsId(*code))
                .ok_or_else(|| {
                    ProcessingError::Configuration(format!(
                        "Zone {}{} has no valid DGN95 EPSG mapping (zones {}-{})",
                        zone,
                        hemisphere.letter(),
                        min_zone,
                        max_zone
                    ))
                })
        }
    }
}

pub fn resolve_spec(spec: &DatumSpec) -> Result<ProjectedCrsId> {
    resolve_epsg(spec.datum, spec.zone, spec.hemisphere)
}

/// Parameters behind an EPSG code: projection plus the shift to WGS84.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedCrs {
    pub id: ProjectedCrsId,
    pub datum: Datum,
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub ellipsoid: Ellipsoid,
    pub to_wgs84: GeocentricTranslation,
}

impl ProjectedCrs {
    pub fn from_epsg(id: ProjectedCrsId) -> Result<Self> {
        let code = id.code();

        if let Some((zone, hemisphere)) = wgs84_utm_zone(code) {
            return Ok(Self {
                id,
                datum: Datum::Wgs84,
                zone,
                hemisphere,
                ellipsoid: Ellipsoid::WGS84,
                to_wgs84: GeocentricTranslation::IDENTITY,
            });
        }

        let dgn95 = DGN95_UTM_NORTH
            .iter()
            .map(|(z, c)| (*z, *c, Hemisphere::North))
            .chain(
                DGN95_UTM_SOUTH
                    .iter()
                    .map(|(z, c)| (*z, *c, Hemisphere::South)),
            )
            .find(|(_, c, _)| *c == code);

        match dgn95 {
            Some((zone, _, hemisphere)) => {
                let [dx, dy, dz] = ID74_TO_WGS84;
                Ok(Self {
                    id,
                    datum: Datum::Dgn95,
                    zone,
                    hemisphere,
                    ellipsoid: Ellipsoid::INDONESIAN_1974,
                    to_wgs84: GeocentricTranslation::new(dx, dy, dz),
                })
            }
            None => Err(ProcessingError::Configuration(format!(
                "{} is not a supported UTM coordinate reference system",
                id
            ))),
        }
    }

    pub fn projection(&self) -> TransverseMercator {
        TransverseMercator::utm(
            self.ellipsoid,
            self.zone,
            self.hemisphere == Hemisphere::South,
        )
    }

    pub fn summary(&self) -> String {
        let projection = self.projection();
        format!(
            "{} - {} / UTM zone {}{}\n\
            - Ellipsoid: {} (a={} m, 1/f={})\n\
            - Central meridian: {}°\n\
            - False northing: {} m\n\
            - Shift to WGS84: dx={} dy={} dz={} m",
            self.id,
            self.datum,
            self.zone,
            self.hemisphere.letter(),
            self.ellipsoid.name,
            self.ellipsoid.a,
            self.ellipsoid.inverse_flattening,
            projection.central_meridian(),
            projection.false_northing(),
            self.to_wgs84.dx,
            self.to_wgs84.dy,
            self.to_wgs84.dz
        )
    }
}

fn wgs84_utm_zone(code: u32) -> Option<(u8, Hemisphere)> {
    let zone_range = 1..=UTM_ZONE_COUNT as u32;
    if zone_range.contains(&code.wrapping_sub(EPSG_WGS84_UTM_NORTH_BASE)) {
        Some(((code - EPSG_WGS84_UTM_NORTH_BASE) as u8, Hemisphere::North))
    } else if zone_range.contains(&code.wrapping_sub(EPSG_WGS84_UTM_SOUTH_BASE)) {
        Some(((code - EPSG_WGS84_UTM_SOUTH_BASE) as u8, Hemisphere::South))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_numbering_for_all_zones() {
        for zone in 1..=60u8 {
            let north = resolve_epsg(Datum::Wgs84, zone, Hemisphere::North).unwrap();
            let south = resolve_epsg(Datum::Wgs84, zone, Hemisphere::South).unwrap();
            assert_eq!(north.code(), 32600 + zone as u32);
            assert_eq!(south.code(), 32700 + zone as u32);
        }
    }

    #[test]
    fn test_wgs84_zone_out_of_range() {
        assert!(resolve_epsg(Datum::Wgs84, 0, Hemisphere::North)
            .unwrap_err()
            .is_configuration());
        assert!(resolve_epsg(Datum::Wgs84, 61, Hemisphere::South)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_dgn95_table() {
        let expected_north = [23846, 23847, 23848, 23849, 23850, 23851, 23852, 23853, 23854];
        let expected_south = [23896, 23897, 23898, 23899, 23890, 23891, 23892, 23893, 23894];

        for (i, zone) in (46..=54u8).enumerate() {
            assert_eq!(
                resolve_epsg(Datum::Dgn95, zone, Hemisphere::North).unwrap().code(),
                expected_north[i]
            );
            assert_eq!(
                resolve_epsg(Datum::Dgn95, zone, Hemisphere::South).unwrap().code(),
                expected_south[i]
            );
        }
    }

    #[test]
    fn test_dgn95_zone_50_south_anomaly() {
        let id = resolve_epsg(Datum::Dgn95, 50, Hemisphere::South).unwrap();
        assert_eq!(id, ProjectedCrsId(23890));
        assert_eq!(id.to_string(), "EPSG:23890");
    }

    #[test]
    fn test_dgn95_zone_outside_table() {
        for zone in [1, 45, 55, 60] {
            for hemisphere in [Hemisphere::North, Hemisphere::South] {
                let err = resolve_epsg(Datum::Dgn95, zone, hemisphere).unwrap_err();
                assert!(err.is_configuration());
                assert!(err.to_string().contains("zones 46-54"), "{}", err);
            }
        }

        let err = resolve_epsg(Datum::Wgs84, 61, Hemisphere::North).unwrap_err();
        assert!(err.to_string().contains("between 1 and 60"), "{}", err);
    }

    #[test]
    fn test_definition_lookup() {
        let wgs = ProjectedCrsId(32748).definition().unwrap();
        assert_eq!(wgs.zone, 48);
        assert_eq!(wgs.hemisphere, Hemisphere::South);
        assert!(wgs.to_wgs84.is_identity());

        let dgn = ProjectedCrsId(23890).definition().unwrap();
        assert_eq!(dgn.datum, Datum::Dgn95);
        assert_eq!(dgn.zone, 50);
        assert_eq!(dgn.hemisphere, Hemisphere::South);
        assert_eq!(dgn.ellipsoid, Ellipsoid::INDONESIAN_1974);

        let north = ProjectedCrsId(23854).definition().unwrap();
        assert_eq!((north.zone, north.hemisphere), (54, Hemisphere::North));
    }

    #[test]
    fn test_unknown_code_definition() {
        assert!(ProjectedCrsId(4326).definition().is_err());
        assert!(ProjectedCrsId(32661).definition().is_err());
        assert!(ProjectedCrsId(32600).definition().is_err());
    }
}
