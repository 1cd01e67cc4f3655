use geo_types::{Coord, Point};

/// Trait for types that carry a longitude/latitude pair in degrees.
///
/// Implemented for `(lon, lat)` tuples, `geo_types::Point<f64>` and
/// `geo_types::Coord<f64>` so the encoding functions accept any of them.
pub trait Coordinate {
    /// Returns the longitude (x).
    fn lon(&self) -> f64;
    /// Returns the latitude (y).
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for Coord<f64> {
    fn lon(&self) -> f64 {
        self.x
    }
    fn lat(&self) -> f64 {
        self.y
    }
}
