/// Longitude of the mesh origin in degrees
pub const ORIGIN_LON: f64 = 100.0;

/// Latitude of the mesh origin in degrees
pub const ORIGIN_LAT: f64 = 0.0;

/// Primary cell width in degrees of longitude
pub const PRIMARY_UNIT_LON: f64 = 1.0;

/// Primary cell height in degrees of latitude (40 minutes)
pub const PRIMARY_UNIT_LAT: f64 = 1.0 / LAT_SCALE;

/// Latitude is multiplied by this to express it in primary rows
pub(crate) const LAT_SCALE: f64 = 1.5;

/// Largest primary row/column index that fits the two-digit groups
pub(crate) const MAX_PRIMARY_INDEX: i64 = 99;

/// Trailing digit that marks a two-fold (2x) mesh code
pub const TWOFOLD_MARKER: u8 = b'5';
