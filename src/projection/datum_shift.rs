use crate::projection::Ellipsoid;

const MAX_LATITUDE_ITERATIONS: usize = 10;

/// Three-parameter geocentric translation from a local datum to WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricTranslation {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl GeocentricTranslation {
    pub const IDENTITY: GeocentricTranslation = GeocentricTranslation {
        dx: 0.0,
        dy: 0.0,
        dz: 0.0,
    };

    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn is_identity(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.dz == 0.0
    }

    /// Move a point on `source` (lat, lon in degrees, height 0) to WGS84 (lat, lon).
    pub fn to_wgs84(&self, source: &Ellipsoid, lat: f64, lon: f64) -> (f64, f64) {
        if self.is_identity() && *source == Ellipsoid::WGS84 {
            return (lat, lon);
        }

        let (x, y, z) = geodetic_to_geocentric(source, lat, lon, 0.0);
        let (lat, lon, _) =
            geocentric_to_geodetic(&Ellipsoid::WGS84, x + self.dx, y + self.dy, z + self.dz);
        (lat, lon)
    }
}

/// Geodetic (degrees, meters) to earth-centred cartesian coordinates.
pub fn geodetic_to_geocentric(ellipsoid: &Ellipsoid, lat: f64, lon: f64, h: f64) -> (f64, f64, f64) {
    let phi = lat.to_radians();
    let lambda = lon.to_radians();
    let nu = ellipsoid.prime_vertical_radius(phi);

    (
        (nu + h) * phi.cos() * lambda.cos(),
        (nu + h) * phi.cos() * lambda.sin(),
        (nu * (1.0 - ellipsoid.e2()) + h) * phi.sin(),
    )
}

/// Earth-centred cartesian to geodetic (lat, lon in degrees, height in meters).
pub fn geocentric_to_geodetic(ellipsoid: &Ellipsoid, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let e2 = ellipsoid.e2();
    let lambda = y.atan2(x);
    let p = x.hypot(y);

    let mut phi = z.atan2(p * (1.0 - e2));
    let mut h = 0.0;
    for _ in 0..MAX_LATITUDE_ITERATIONS {
        let nu = ellipsoid.prime_vertical_radius(phi);
        h = p / phi.cos() - nu;
        let next = z.atan2(p * (1.0 - e2 * nu / (nu + h)));
        let converged = (next - phi).abs() < 1e-14;
        phi = next;
        if converged {
            break;
        }
    }

    (phi.to_degrees(), lambda.to_degrees(), h)
}
