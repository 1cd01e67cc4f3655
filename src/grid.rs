use crate::cell::MeshCell;
use crate::coord::Coordinate;
use crate::error::MeshError;
use crate::geom::create_cell_polygon_from_rect;
use crate::index::{
    ExtentBounds, ExtentOptions, MeshLevel, Stepping, cover_codes_with, decode_with_level, encode,
    par_cover_codes,
};
use geo_types::{Polygon, Rect, coord};
use tracing::debug;

/// The distinct cells of one level covering a lon/lat extent, in row-major
/// order (south to north, west to east).
#[derive(Debug, Clone)]
pub struct MeshGrid {
    cells: Vec<MeshCell>,
    level: MeshLevel,
}

impl MeshGrid {
    pub fn builder() -> MeshGridBuilder {
        MeshGridBuilder::new()
    }

    pub fn from_extent(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        level: MeshLevel,
    ) -> Result<Self, MeshError> {
        let cells = cells_for_extent(
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            level,
            ExtentOptions::new().dedup(true),
        )?;
        Ok(Self { cells, level })
    }

    pub fn from_rect(rect: &Rect<f64>, level: MeshLevel) -> Result<Self, MeshError> {
        Self::from_extent(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            level,
        )
    }

    pub fn level(&self) -> MeshLevel {
        self.level
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[MeshCell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<MeshCell> {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshCell> {
        self.cells.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.code.as_str())
    }

    /// The grid cell containing `coord`, if the grid has one.
    pub fn get_cell_at(&self, coord: &impl Coordinate) -> Option<&MeshCell> {
        let code = encode(coord.lon(), coord.lat(), self.level).ok()?;
        self.cells.iter().find(|cell| cell.code == code)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.iter().map(|cell| cell.to_polygon()).collect()
    }

    /// Bounding rectangle of every cell in the grid, `None` when empty.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let first = self.cells.first()?;
        let init = (first.min_lon, first.min_lat, first.max_lon, first.max_lat);
        let (w, s, e, n) = self.cells.iter().fold(init, |(w, s, e, n), cell| {
            (
                w.min(cell.min_lon),
                s.min(cell.min_lat),
                e.max(cell.max_lon),
                n.max(cell.max_lat),
            )
        });
        Some(Rect::new(coord! { x: w, y: s }, coord! { x: e, y: n }))
    }

    pub fn bounds_polygon(&self) -> Option<Polygon<f64>> {
        self.bounds().map(|rect| create_cell_polygon_from_rect(&rect))
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&MeshCell>
    where
        F: Fn(&MeshCell) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).collect()
    }
}

/// Builder for [`MeshGrid`] when the default sampling needs adjusting.
///
/// ```
/// use stdmesh_rs::{ExtentBounds, MeshGrid, MeshLevel};
///
/// # fn main() -> Result<(), stdmesh_rs::MeshError> {
/// let grid = MeshGrid::builder()
///     .level(MeshLevel::Secondary)
///     .extent(139.70, 35.65, 139.80, 35.70)
///     .bounds(ExtentBounds::Inclusive)
///     .build()?;
/// assert!(!grid.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MeshGridBuilder {
    level: Option<MeshLevel>,
    extent: Option<(f64, f64, f64, f64)>,
    options: ExtentOptions,
    parallel: bool,
}

impl MeshGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: MeshLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn extent(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.extent = Some((min_lon, min_lat, max_lon, max_lat));
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.extent = Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y));
        self
    }

    pub fn bounds(mut self, bounds: ExtentBounds) -> Self {
        self.options = self.options.bounds(bounds);
        self
    }

    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.options = self.options.stepping(stepping);
        self
    }

    /// Encode rows on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<MeshGrid, MeshError> {
        let level = self.level.ok_or(MeshError::IncompleteBuilder("level"))?;
        let (min_lon, min_lat, max_lon, max_lat) =
            self.extent.ok_or(MeshError::IncompleteBuilder("extent"))?;
        let options = self.options.dedup(true);

        let cells = if self.parallel {
            par_cover_codes(min_lon, min_lat, max_lon, max_lat, level, options)?
                .into_iter()
                .map(|code| decode_with_level(code.as_str(), level))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            cells_for_extent(min_lon, min_lat, max_lon, max_lat, level, options)?
        };

        Ok(MeshGrid { cells, level })
    }
}

/// Decoded cells for every code [`cover_codes_with`] yields over an extent.
pub(crate) fn cells_for_extent(
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    level: MeshLevel,
    options: ExtentOptions,
) -> Result<Vec<MeshCell>, MeshError> {
    let cells = cover_codes_with(min_lon, min_lat, max_lon, max_lat, level, options)
        .map(|code| decode_with_level(code?.as_str(), level))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(%level, cells = cells.len(), "built mesh cells for extent");
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_grid_from_extent() -> Result<(), MeshError> {
        let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)?;
        assert_eq!(grid.level(), MeshLevel::Secondary);

        let codes: Vec<&str> = grid.codes().collect();
        assert_eq!(codes, vec!["533935", "533936", "533945", "533946"]);
        for cell in grid.iter() {
            assert_eq!(cell.level, MeshLevel::Secondary);
        }
        Ok(())
    }

    #[test]
    fn test_grid_from_rect() -> Result<(), MeshError> {
        let rect = Rect::new(
            coord! { x: 139.70, y: 35.65 },
            coord! { x: 139.80, y: 35.70 },
        );
        let grid = MeshGrid::from_rect(&rect, MeshLevel::Standard)?;
        assert!(!grid.is_empty());

        let mut codes: Vec<&str> = grid.codes().collect();
        let len = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), len);
        Ok(())
    }

    #[test]
    fn test_grid_builder() -> Result<(), MeshError> {
        let grid = MeshGrid::builder()
            .level(MeshLevel::Standard)
            .extent(139.70, 35.65, 139.80, 35.70)
            .build()?;
        let from_extent = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Standard)?;
        assert_eq!(grid.cells(), from_extent.cells());
        Ok(())
    }

    #[test]
    fn test_grid_builder_parallel() -> Result<(), MeshError> {
        let sequential = MeshGrid::builder()
            .level(MeshLevel::FiveFold)
            .extent(139.5, 35.5, 140.0, 36.0)
            .build()?;
        let parallel = MeshGrid::builder()
            .level(MeshLevel::FiveFold)
            .extent(139.5, 35.5, 140.0, 36.0)
            .parallel(true)
            .build()?;
        assert_eq!(sequential.cells(), parallel.cells());
        Ok(())
    }

    #[test]
    fn test_grid_builder_requires_level_and_extent() {
        assert!(matches!(
            MeshGrid::builder().extent(139.0, 35.0, 140.0, 36.0).build(),
            Err(MeshError::IncompleteBuilder("level"))
        ));
        assert!(matches!(
            MeshGrid::builder().level(MeshLevel::Primary).build(),
            Err(MeshError::IncompleteBuilder("extent"))
        ));
    }

    #[test]
    fn test_get_cell_at() -> Result<(), MeshError> {
        let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)?;
        let pt = point! { x: 139.7671, y: 35.6812 };

        let cell = grid.get_cell_at(&pt).map(|c| c.code.as_str());
        assert_eq!(cell, Some("533946"));
        assert!(grid.get_cell_at(&(135.5, 34.7)).is_none());
        Ok(())
    }

    #[test]
    fn test_filter_and_polygons() -> Result<(), MeshError> {
        let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)?;

        let east = grid.filter(|cell| cell.min_lon >= 139.75);
        assert_eq!(east.len(), 2);
        assert_eq!(grid.to_polygons().len(), grid.len());
        Ok(())
    }

    #[test]
    fn test_bounds_cover_every_cell() -> Result<(), MeshError> {
        let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)?;
        let bounds = grid.bounds().ok_or(MeshError::IncompleteBuilder("bounds"))?;

        assert!((bounds.min().x - 139.625).abs() < 1e-9);
        assert!((bounds.max().x - 139.875).abs() < 1e-9);
        assert!(grid.bounds_polygon().is_some());

        let empty = MeshGrid::from_extent(140.0, 35.0, 139.0, 36.0, MeshLevel::Primary)?;
        assert!(empty.is_empty());
        assert!(empty.bounds().is_none());
        Ok(())
    }

    #[test]
    fn test_out_of_range_extent_is_an_error() {
        assert!(matches!(
            MeshGrid::from_extent(99.0, 35.0, 101.0, 36.0, MeshLevel::Primary),
            Err(MeshError::InvalidCoordinate(_, _))
        ));
    }
}
