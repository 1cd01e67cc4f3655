mod parse;
mod polygon;

pub use parse::{parse_extent, parse_geojson, parse_geometry, parse_wkt};
pub use polygon::{create_cell_polygon, create_cell_polygon_from_rect};
