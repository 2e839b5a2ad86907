/// WGS84 ellipsoid
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Indonesian National Spheroid 1974
pub const ID74_SEMI_MAJOR_AXIS: f64 = 6_378_160.0;
pub const ID74_INVERSE_FLATTENING: f64 = 298.247;

/// Geocentric translation ID74 -> WGS84 in meters (dx, dy, dz)
pub const ID74_TO_WGS84: [f64; 3] = [-24.0, -15.0, 5.0];

/// UTM projection parameters
pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
pub const UTM_ZONE_WIDTH: f64 = 6.0;
pub const UTM_ZONE_COUNT: u8 = 60;

/// Latitude limits of the UTM grid
pub const UTM_MIN_LAT: f64 = -80.0;
pub const UTM_MAX_LAT: f64 = 84.0;

/// EPSG bases for WGS 84 / UTM
pub const EPSG_WGS84_UTM_NORTH_BASE: u32 = 32_600;
pub const EPSG_WGS84_UTM_SOUTH_BASE: u32 = 32_700;

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_STEM: &str = "konversi-koordinat";
pub const DEFAULT_SETTINGS_FILE: &str = "coordinate-processor.toml";
pub const SETTINGS_ENV_PREFIX: &str = "COORD";

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
