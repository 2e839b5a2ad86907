//! Transverse Mercator projection using the Krüger series.
//!
//! The series is carried to sixth order in the third flattening `n`, which
//! keeps the projection accurate to a few nanometres within a UTM zone and
//! well below a millimetre several zones away from the central meridian.
//!
//! # Example
//!
//! ```
//! use coordinate_processor::projection::{Ellipsoid, MapProjection, TransverseMercator};
//!
//! let tm = TransverseMercator::utm(Ellipsoid::WGS84, 48, false);
//! let (easting, northing) = tm.geo_to_xy(-6.175392, 106.827153);
//! let (lat, lon) = tm.xy_to_geo(easting, northing);
//! assert!((lat - -6.175392).abs() < 1e-9);
//! assert!((lon - 106.827153).abs() < 1e-9);
//! ```

use crate::projection::Ellipsoid;
use crate::utils::constants::{
    UTM_FALSE_EASTING, UTM_FALSE_NORTHING_SOUTH, UTM_SCALE_FACTOR, UTM_ZONE_WIDTH,
};

const SERIES_ORDER: usize = 6;
const MAX_NEWTON_ITERATIONS: usize = 10;

/// Conversion between geographic (lat, lon in degrees) and projected (x, y in meters).
pub trait MapProjection {
    /// Geographic to projected: returns (easting, northing).
    fn geo_to_xy(&self, lat: f64, lon: f64) -> (f64, f64);

    /// Projected to geographic: returns (lat, lon).
    fn xy_to_geo(&self, x: f64, y: f64) -> (f64, f64);
}

#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    /// Central meridian in degrees
    central_meridian: f64,
    scale_factor: f64,
    false_easting: f64,
    false_northing: f64,
    /// Rectifying radius divided by the semi-major axis
    rectifying_ratio: f64,
    alpha: [f64; SERIES_ORDER],
    beta: [f64; SERIES_ORDER],
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_ratio = (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0) / (1.0 + n);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        Self {
            ellipsoid,
            central_meridian,
            scale_factor,
            false_easting,
            false_northing,
            rectifying_ratio,
            alpha,
            beta,
        }
    }

    /// UTM zone projection on the given ellipsoid.
    pub fn utm(ellipsoid: Ellipsoid, zone: u8, southern: bool) -> Self {
        let false_northing = if southern {
            UTM_FALSE_NORTHING_SOUTH
        } else {
            0.0
        };

        Self::new(
            ellipsoid,
            utm_central_meridian(zone),
            UTM_SCALE_FACTOR,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }

    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    pub fn false_northing(&self) -> f64 {
        self.false_northing
    }

    fn scaled_radius(&self) -> f64 {
        self.scale_factor * self.ellipsoid.a * self.rectifying_ratio
    }

    /// Geodetic latitude from the tangent of the conformal latitude (Newton iteration).
    fn geodetic_tangent(&self, tau_prime: f64) -> f64 {
        let e = self.ellipsoid.eccentricity();
        let e2 = self.ellipsoid.e2();
        let one_minus_e2 = 1.0 - e2;

        let mut tau = tau_prime;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
            let tau_i = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
            let delta = (tau_prime - tau_i) / (1.0 + tau_i * tau_i).sqrt()
                * (1.0 + one_minus_e2 * tau * tau)
                / (one_minus_e2 * (1.0 + tau * tau).sqrt());
            tau += delta;
            if delta.abs() < 1e-14 * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

impl MapProjection for TransverseMercator {
    fn geo_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let e = self.ellipsoid.eccentricity();
        let phi = lat.to_radians();
        let lambda = (lon - self.central_meridian).to_radians();

        // Conformal latitude expressed through its tangent
        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
        let xi_prime = t.atan2(lambda.cos());
        let eta_prime = (lambda.sin() / t.hypot(lambda.cos())).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let radius = self.scaled_radius();
        (
            self.false_easting + radius * eta,
            self.false_northing + radius * xi,
        )
    }

    fn xy_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let radius = self.scaled_radius();
        let xi = (y - self.false_northing) / radius;
        let eta = (x - self.false_easting) / radius;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let tau_prime = xi_prime.sin() / eta_prime.sinh().hypot(xi_prime.cos());
        let lambda = eta_prime.sinh().atan2(xi_prime.cos());
        let tau = self.geodetic_tangent(tau_prime);

        (tau.atan().to_degrees(), self.central_meridian + lambda.to_degrees())
    }
}

/// Central meridian of a 6°-wide UTM zone.
pub fn utm_central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * UTM_ZONE_WIDTH - 180.0 + UTM_ZONE_WIDTH / 2.0
}
