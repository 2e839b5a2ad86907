use crate::utils::constants::{
    ID74_INVERSE_FLATTENING, ID74_SEMI_MAJOR_AXIS, WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
};

/// Reference ellipsoid given by semi-major axis and inverse flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis in meters
    pub a: f64,
    /// Inverse flattening 1/f
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        name: "WGS 84",
        a: WGS84_SEMI_MAJOR_AXIS,
        inverse_flattening: WGS84_INVERSE_FLATTENING,
    };

    /// Indonesian National Spheroid, used by the ID74 / DGN95 UTM grids.
    pub const INDONESIAN_1974: Ellipsoid = Ellipsoid {
        name: "Indonesian National Spheroid",
        a: ID74_SEMI_MAJOR_AXIS,
        inverse_flattening: ID74_INVERSE_FLATTENING,
    };

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    pub fn eccentricity(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Third flattening n = f / (2 - f), the expansion parameter of the Krüger series.
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    /// Radius of curvature in the prime vertical at the given latitude (radians).
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        self.a / (1.0 - self.e2() * lat_rad.sin().powi(2)).sqrt()
    }
}
