use crate::cell::MeshCell;
use crate::error::MeshError;
use arrow_array::{Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

// mesh cells are plain lon/lat degrees, no CRS is attached
fn lonlat_metadata() -> Arc<Metadata> {
    Arc::new(Metadata::default())
}

/// Trait for converting collections of [`MeshCell`]s to Arrow arrays.
///
/// Implemented for `[MeshCell]` and `Vec<MeshCell>`.
pub trait MeshCellsToArrow {
    /// Cell centres as a GeoArrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Cell rectangles as a GeoArrow PolygonArray.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// RecordBatch with code, level, min_lon, min_lat, max_lon, max_lat and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, MeshError>;
}

impl MeshCellsToArrow for [MeshCell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, lonlat_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, lonlat_metadata());
        let polygons: Vec<_> = self.par_iter().map(MeshCell::to_polygon).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, MeshError> {
        let polygon_array = self.to_arrow_polygons();
        let codes: StringArray = self.iter().map(|c| Some(c.code.as_str())).collect();
        let levels: StringArray = self.iter().map(|c| Some(c.level.tag())).collect();
        let bound = |f: fn(&MeshCell) -> f64| -> Float64Array {
            self.iter().map(|c| Some(f(c))).collect()
        };

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("code", DataType::Utf8, false),
            Field::new("level", DataType::Utf8, false),
            Field::new("min_lon", DataType::Float64, false),
            Field::new("min_lat", DataType::Float64, false),
            Field::new("max_lon", DataType::Float64, false),
            Field::new("max_lat", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(codes),
                Arc::new(levels),
                Arc::new(bound(|c| c.min_lon)),
                Arc::new(bound(|c| c.min_lat)),
                Arc::new(bound(|c| c.max_lon)),
                Arc::new(bound(|c| c.max_lat)),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| MeshError::ArrowError(e.to_string()))
    }
}

impl MeshCellsToArrow for Vec<MeshCell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, MeshError> {
        self.as_slice().to_record_batch()
    }
}
