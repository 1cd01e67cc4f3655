//! # stdmesh-rs
//!
//! Encoding, decoding and enumeration of Japanese Standard Area Mesh codes:
//! the hierarchical lon/lat grid in which every cell is named by a decimal
//! digit string that grows longer as the cells get finer.
//!
//! ### 1. Codes and levels
//!
//! ```
//! use stdmesh_rs::{MeshLevel, decode, detect_level, encode};
//!
//! # fn main() -> Result<(), stdmesh_rs::MeshError> {
//! let code = encode(139.7671, 35.6812, MeshLevel::Standard)?;
//! assert_eq!(code.as_str(), "53394611");
//! assert_eq!(detect_level(code.as_str())?, MeshLevel::Standard);
//!
//! let cell = decode(code.as_str())?;
//! assert!(cell.contains(&(139.7671, 35.6812)));
//! # Ok(())
//! # }
//! ```
//!
//! 10-digit codes can be either quarter or tenth cells, so they must be
//! decoded with [`decode_with_level`].
//!
//! ### 2. `MeshCell` - Single Cell Operations
//!
//! ```
//! use stdmesh_rs::{MeshCell, MeshLevel};
//!
//! # fn main() -> Result<(), stdmesh_rs::MeshError> {
//! let cell = MeshCell::from_lonlat(&(135.4959, 34.7025), MeshLevel::Half)?;
//! println!("{} {}", cell.code, cell.to_wkt());
//! let parent = cell.parent();
//! assert_eq!(parent.map(|p| p.level), Some(MeshLevel::Standard));
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `MeshGrid` and `cover_codes` - Extents
//!
//! ```
//! use stdmesh_rs::{MeshGrid, MeshLevel, cover_codes};
//!
//! # fn main() -> Result<(), stdmesh_rs::MeshError> {
//! // lazy, restartable code sequence
//! let codes = cover_codes(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert!(!codes.is_empty());
//!
//! // distinct decoded cells
//! let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary)?;
//! assert_eq!(grid.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. `MeshCellsToArrow` - Arrow Export
//!
//! ```
//! use stdmesh_rs::{MeshCellsToArrow, MeshGrid, MeshLevel};
//!
//! # fn main() -> Result<(), stdmesh_rs::MeshError> {
//! let grid = MeshGrid::from_extent(139.70, 35.65, 139.80, 35.70, MeshLevel::Standard)?;
//! let batch = grid.cells().to_record_batch()?;
//! assert_eq!(batch.num_rows(), grid.len());
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;

pub use cell::MeshCell;
pub use coord::Coordinate;
pub use error::MeshError;
pub use geom::{
    create_cell_polygon, create_cell_polygon_from_rect, parse_extent, parse_geojson,
    parse_geometry, parse_wkt,
};
pub use grid::{MeshGrid, MeshGridBuilder};
pub use index::{
    DigitRule, ExtentBounds, ExtentCodes, ExtentOptions, MeshCode, MeshLevel, ORIGIN_LAT,
    ORIGIN_LON, PRIMARY_UNIT_LAT, PRIMARY_UNIT_LON, Stepping, TWOFOLD_MARKER, cover_codes,
    cover_codes_with, decode, decode_with_level, detect_level, encode, level_candidates,
    par_cover_codes, to_wkt, unit_size,
};
pub use io::MeshCellsToArrow;

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
