use geo_types::{Coord, LineString, Polygon, Rect};

/// Closed rectangular ring for a cell, wound SW, NW, NE, SE and back to SW.
pub fn create_cell_polygon(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Polygon<f64> {
    let ring = vec![
        Coord { x: min_lon, y: min_lat },
        Coord { x: min_lon, y: max_lat },
        Coord { x: max_lon, y: max_lat },
        Coord { x: max_lon, y: min_lat },
        Coord { x: min_lon, y: min_lat },
    ];

    Polygon::new(LineString::from(ring), vec![])
}

pub fn create_cell_polygon_from_rect(rect: &Rect<f64>) -> Polygon<f64> {
    create_cell_polygon(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
}
