use crate::coord::Coordinate;
use crate::error::MeshError;
use crate::geom::create_cell_polygon;
use crate::grid::cells_for_extent;
use crate::index::{ExtentOptions, MeshCode, MeshLevel, decode, decode_with_level, encode, to_wkt};
use geo::BoundingRect;
use geo_types::{Geometry, LineString, Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single cell of the standard area mesh.
///
/// Each `MeshCell` is the lon/lat rectangle denoted by one mesh code at one
/// level. Cells are plain values: build them with [`MeshCell::from_code`] or
/// [`MeshCell::from_lonlat`] and convert them to whatever geometry the caller
/// needs.
///
/// # Example
///
/// ```
/// use stdmesh_rs::{MeshCell, MeshLevel};
///
/// # fn main() -> Result<(), stdmesh_rs::MeshError> {
/// let cell = MeshCell::from_lonlat(&(139.7671, 35.6812), MeshLevel::Standard)?;
/// assert_eq!(cell.code.as_str(), "53394611");
///
/// let restored = MeshCell::from_code("53394611")?;
/// assert_eq!(cell, restored);
///
/// println!("{}", cell.to_wkt());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshCell {
    /// Mesh code of this cell
    pub code: MeshCode,
    /// Level the code was written at
    pub level: MeshLevel,
    /// West edge in degrees
    pub min_lon: f64,
    /// South edge in degrees
    pub min_lat: f64,
    /// East edge in degrees
    pub max_lon: f64,
    /// North edge in degrees
    pub max_lat: f64,
}

impl MeshCell {
    pub(crate) fn new(
        code: MeshCode,
        level: MeshLevel,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Self {
        Self {
            code,
            level,
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Decode a cell from its mesh code, detecting the level.
    ///
    /// 10-digit codes are ambiguous (quarter or tenth); use
    /// [`MeshCell::from_code_with_level`] for those.
    pub fn from_code(code: &str) -> Result<Self, MeshError> {
        decode(code)
    }

    /// Decode a cell from its mesh code at a known level.
    pub fn from_code_with_level(code: &str, level: MeshLevel) -> Result<Self, MeshError> {
        decode_with_level(code, level)
    }

    /// The cell at `level` that contains a lon/lat coordinate.
    ///
    /// # Example
    /// ```
    /// use stdmesh_rs::{MeshCell, MeshLevel};
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), stdmesh_rs::MeshError> {
    /// // From tuple
    /// let cell = MeshCell::from_lonlat(&(135.4959, 34.7025), MeshLevel::Secondary)?;
    /// // From Point
    /// let same = MeshCell::from_lonlat(&Point::new(135.4959, 34.7025), MeshLevel::Secondary)?;
    /// assert_eq!(cell.code, same.code);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_lonlat(coord: &impl Coordinate, level: MeshLevel) -> Result<Self, MeshError> {
        let code = encode(coord.lon(), coord.lat(), level)?;
        decode_with_level(code.as_str(), level)
    }

    /// Cells crossed by a LineString in lon/lat coordinates.
    ///
    /// Samples each segment at half the smaller cell dimension and returns
    /// every distinct cell hit, in the order the line first enters it.
    pub fn from_line_string(line: &LineString, level: MeshLevel) -> Result<Vec<Self>, MeshError> {
        let (unit_lon, unit_lat) = level.unit_size();
        let step_size = unit_lon.min(unit_lat) * 0.5;

        let mut seen: HashSet<MeshCode> = HashSet::new();
        let mut cells = Vec::new();

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = ((dx * dx + dy * dy).sqrt() / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let code = encode(start.x + t * dx, start.y + t * dy, level)?;
                if seen.insert(code.clone()) {
                    cells.push(decode_with_level(code.as_str(), level)?);
                }
            }
        }

        // a single-vertex line still names one cell
        if let ([only], true) = (line.0.as_slice(), cells.is_empty()) {
            cells.push(Self::from_lonlat(only, level)?);
        }

        Ok(cells)
    }

    /// Cells for an arbitrary `geo_types::Geometry` in lon/lat coordinates.
    ///
    /// Points map to the cell containing them, lines to the cells they cross,
    /// and areal geometries (polygons, rects, triangles) to every cell
    /// overlapping their bounding rectangle.
    pub fn from_geometry(geom: Geometry<f64>, level: MeshLevel) -> Result<Vec<Self>, MeshError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_lonlat(&pt, level)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_lonlat(pt, level))
                .collect(),
            Geometry::Line(line) => {
                Self::from_line_string(&LineString::from(vec![line.start, line.end]), level)
            }
            Geometry::LineString(line) => Self::from_line_string(&line, level),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line, level)?);
                }
                Ok(all_cells)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g, level)?);
                }
                Ok(all_cells)
            }
            areal => match areal.bounding_rect() {
                Some(rect) => cells_for_extent(
                    rect.min().x,
                    rect.min().y,
                    rect.max().x,
                    rect.max().y,
                    level,
                    ExtentOptions::new().dedup(true),
                ),
                None => Ok(vec![]),
            },
        }
    }

    /// Cell width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Cell height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Whether the coordinate lies in the cell. West and south edges are
    /// inside, east and north edges belong to the neighbouring cells.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.min_lon..self.max_lon).contains(&coord.lon())
            && (self.min_lat..self.max_lat).contains(&coord.lat())
    }

    /// The enclosing cell one level up, `None` for primary cells.
    pub fn parent(&self) -> Option<Self> {
        let parent = self.level.parent()?;
        let code = self.code.truncate_to(self.level, parent)?;
        decode_with_level(code.as_str(), parent).ok()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Converts this cell to a closed rectangular polygon (SW, NW, NE, SE, SW).
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }

    /// `POLYGON((...))` WKT for this cell, see [`to_wkt`].
    pub fn to_wkt(&self) -> String {
        to_wkt(self)
    }

    /// GeoJSON geometry for this cell.
    pub fn to_geojson(&self) -> String {
        geojson::Geometry::from(&self.to_polygon()).to_string()
    }

    /// GeoJSON feature with `code` and `level` properties.
    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let mut properties = serde_json::Map::new();
        properties.insert("code".to_string(), self.code.as_str().into());
        properties.insert("level".to_string(), self.level.tag().into());

        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: Some(geojson::feature::Id::String(self.code.to_string())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
