//! Datum/zone resolution and the geodetic transforms between UTM grids and
//! WGS84 geographic coordinates.

pub mod datum_shift;
pub mod ellipsoid;
pub mod epsg;
pub mod transform;
pub mod transverse_mercator;

pub use datum_shift::GeocentricTranslation;
pub use ellipsoid::Ellipsoid;
pub use epsg::{resolve_epsg, resolve_spec, ProjectedCrs, ProjectedCrsId};
pub use transform::{geographic_to_auto_utm, projected_to_geographic, utm_zone_for};
pub use transverse_mercator::{utm_central_meridian, MapProjection, TransverseMercator};
