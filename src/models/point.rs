use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// A WGS84 geographic point, the pivot every representation converts through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct CanonicalPoint {
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon_dd: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat_dd: f64,
}

impl CanonicalPoint {
    /// Build a point, rejecting non-finite or out-of-range values.
    pub fn new(lon_dd: f64, lat_dd: f64) -> Result<Self> {
        if !lon_dd.is_finite() || !lat_dd.is_finite() {
            return Err(ProcessingError::InvalidCoordinate(format!(
                "Non-finite coordinate: lon={}, lat={}",
                lon_dd, lat_dd
            )));
        }

        let point = Self { lon_dd, lat_dd };
        point.validate()?;
        Ok(point)
    }

    /// (lon, lat) pair, the axis order used for GeoJSON geometry.
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.lon_dd, self.lat_dd)
    }
}
