pub mod arrow;

pub use arrow::MeshCellsToArrow;
