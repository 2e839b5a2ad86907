use crate::error::{ProcessingError, Result};
use crate::models::{CanonicalPoint, Hemisphere, UtmCoordinate};
use crate::projection::{Ellipsoid, MapProjection, ProjectedCrs, TransverseMercator};
use crate::utils::constants::{UTM_MAX_LAT, UTM_MIN_LAT, UTM_ZONE_COUNT, UTM_ZONE_WIDTH};

/// Inverse projection of an (easting, northing) pair into a WGS84 point.
///
/// Axis order is always x = easting, y = northing.
pub fn projected_to_geographic(
    crs: &ProjectedCrs,
    easting: f64,
    northing: f64,
) -> Result<CanonicalPoint> {
    if !easting.is_finite() || !northing.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Non-finite projected coordinate: x={}, y={}",
            easting, northing
        )));
    }

    let (lat, lon) = crs.projection().xy_to_geo(easting, northing);
    let (lat, lon) = crs.to_wgs84.to_wgs84(&crs.ellipsoid, lat, lon);

    CanonicalPoint::new(wrap_longitude(lon), lat).map_err(|_| {
        ProcessingError::Projection(format!(
            "({}, {}) in {} falls outside the geographic domain",
            easting, northing, crs.id
        ))
    })
}

/// Grid points past the zone 1 or zone 60 edge invert beyond ±180°.
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// UTM zone number for a WGS84 position, honouring the Norway and Svalbard exceptions.
pub fn utm_zone_for(lat: f64, lon: f64) -> Result<u8> {
    if !(UTM_MIN_LAT..=UTM_MAX_LAT).contains(&lat) {
        return Err(ProcessingError::Projection(format!(
            "Latitude {} is outside the UTM range [{}, {}]",
            lat, UTM_MIN_LAT, UTM_MAX_LAT
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ProcessingError::Projection(format!(
            "Longitude {} is outside [-180, 180]",
            lon
        )));
    }

    // Southwest Norway
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return Ok(32);
    }

    // Svalbard
    if (72.0..=84.0).contains(&lat) && (0.0..42.0).contains(&lon) {
        let zone = match lon {
            l if l < 9.0 => 31,
            l if l < 21.0 => 33,
            l if l < 33.0 => 35,
            _ => 37,
        };
        return Ok(zone);
    }

    let zone = ((lon + 180.0) / UTM_ZONE_WIDTH).floor() as u8 + 1;
    Ok(zone.min(UTM_ZONE_COUNT))
}

/// Project a WGS84 point into its own UTM zone.
///
/// The hemisphere follows the latitude sign: the equator and everything
/// north of it is `N`.
pub fn geographic_to_auto_utm(point: &CanonicalPoint) -> Result<UtmCoordinate> {
    let zone = utm_zone_for(point.lat_dd, point.lon_dd)?;
    let hemisphere = Hemisphere::from_latitude(point.lat_dd);

    let projection = TransverseMercator::utm(
        Ellipsoid::WGS84,
        zone,
        hemisphere == Hemisphere::South,
    );
    let (easting, northing) = projection.geo_to_xy(point.lat_dd, point.lon_dd);

    if !easting.is_finite() || !northing.is_finite() {
        return Err(ProcessingError::Projection(format!(
            "UTM projection of ({}, {}) is not finite",
            point.lon_dd, point.lat_dd
        )));
    }

    Ok(UtmCoordinate {
        easting,
        northing,
        zone_label: format!("{}{}", zone, hemisphere.letter()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Datum;
    use crate::projection::{resolve_epsg, ProjectedCrsId};

    #[test]
    fn test_zone_partition() {
        assert_eq!(utm_zone_for(0.0, -180.0).unwrap(), 1);
        assert_eq!(utm_zone_for(0.0, -174.0).unwrap(), 2);
        assert_eq!(utm_zone_for(-6.2, 106.8).unwrap(), 48);
        assert_eq!(utm_zone_for(0.0, 179.9).unwrap(), 60);
        assert_eq!(utm_zone_for(0.0, 180.0).unwrap(), 60);
    }

    #[test]
    fn test_norway_and_svalbard_exceptions() {
        assert_eq!(utm_zone_for(60.39, 5.32).unwrap(), 32);
        assert_eq!(utm_zone_for(60.39, 2.9).unwrap(), 31);
        assert_eq!(utm_zone_for(78.2, 8.0).unwrap(), 31);
        assert_eq!(utm_zone_for(78.2, 15.6).unwrap(), 33);
        assert_eq!(utm_zone_for(78.2, 25.0).unwrap(), 35);
        assert_eq!(utm_zone_for(78.2, 40.0).unwrap(), 37);
        assert_eq!(utm_zone_for(78.2, 43.0).unwrap(), 38);
    }

    #[test]
    fn test_polar_input_fails() {
        assert!(utm_zone_for(84.5, 10.0).is_err());
        assert!(utm_zone_for(-80.01, 10.0).is_err());
        let pole = CanonicalPoint::new(0.0, 90.0).unwrap();
        assert!(geographic_to_auto_utm(&pole).is_err());
    }

    #[test]
    fn test_auto_utm_monas() {
        let point = CanonicalPoint::new(106.827153, -6.175392).unwrap();
        let utm = geographic_to_auto_utm(&point).unwrap();

        assert_eq!(utm.zone_label, "48S");
        assert!((utm.easting - 702_178.12).abs() < 1.0, "easting: {}", utm.easting);
        assert!((utm.northing - 9_317_060.29).abs() < 1.0, "northing: {}", utm.northing);
    }

    #[test]
    fn test_auto_utm_roundtrip() {
        let point = CanonicalPoint::new(106.827153, -6.175392).unwrap();
        let utm = geographic_to_auto_utm(&point).unwrap();

        let crs = resolve_epsg(Datum::Wgs84, 48, Hemisphere::South)
            .and_then(|id| id.definition())
            .unwrap();
        let back = projected_to_geographic(&crs, utm.easting, utm.northing).unwrap();

        assert!((back.lon_dd - point.lon_dd).abs() < 1e-6);
        assert!((back.lat_dd - point.lat_dd).abs() < 1e-6);
    }

    #[test]
    fn test_equator_is_north() {
        let point = CanonicalPoint::new(110.0, 0.0).unwrap();
        let utm = geographic_to_auto_utm(&point).unwrap();
        assert_eq!(utm.zone_label, "49N");
        assert!(utm.northing.abs() < 1e-6);
    }

    #[test]
    fn test_dgn95_differs_from_wgs84() {
        let wgs = ProjectedCrsId(32750).definition().unwrap();
        let dgn = ProjectedCrsId(23890).definition().unwrap();

        let a = projected_to_geographic(&wgs, 500_000.0, 9_000_000.0).unwrap();
        let b = projected_to_geographic(&dgn, 500_000.0, 9_000_000.0).unwrap();

        assert!((a.lat_dd - -9.04656246376895).abs() < 1e-8);
        assert!((b.lat_dd - -9.046488504820912).abs() < 1e-7);
        assert!((b.lon_dd - 117.00025643921839).abs() < 1e-7);
        assert!((a.lon_dd - b.lon_dd).abs() > 1e-4);
    }

    #[test]
    fn test_longitude_wraps_across_antimeridian() {
        let zone_60 = ProjectedCrsId(32660).definition().unwrap();
        let east = projected_to_geographic(&zone_60, 800_000.0, 6_650_000.0).unwrap();
        assert!((-178.0..-177.0).contains(&east.lon_dd), "lon: {}", east.lon_dd);
        assert!((59.0..61.0).contains(&east.lat_dd), "lat: {}", east.lat_dd);

        let zone_1 = ProjectedCrsId(32601).definition().unwrap();
        let west = projected_to_geographic(&zone_1, 200_000.0, 6_650_000.0).unwrap();
        assert!((177.0..178.0).contains(&west.lon_dd), "lon: {}", west.lon_dd);
        assert!((east.lon_dd + west.lon_dd).abs() < 1e-9);

        assert_eq!(wrap_longitude(182.5), -177.5);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(-182.5), 177.5);
    }

    #[test]
    fn test_non_finite_projected_input() {
        let wgs = ProjectedCrsId(32748).definition().unwrap();
        assert!(projected_to_geographic(&wgs, f64::NAN, 9_317_000.0).is_err());
        assert!(projected_to_geographic(&wgs, 703_000.0, f64::INFINITY).is_err());
    }
}
