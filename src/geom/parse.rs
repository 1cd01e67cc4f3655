use crate::error::MeshError;
use geo::BoundingRect;
use geo_types::{Geometry, GeometryCollection, Rect};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn parse_error(msg: impl ToString) -> MeshError {
    MeshError::GeometryParseError(msg.to_string())
}

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// Input starting with `{` is read as GeoJSON, anything else as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, MeshError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry, feature or feature collection.
///
/// Feature collections become a `GeometryCollection` of their features'
/// geometries; features without a geometry are skipped.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, MeshError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| parse_error(e))?;

    match geojson {
        GeoJson::Geometry(geom) => Geometry::try_from(geom).map_err(parse_error),
        GeoJson::Feature(feature) => {
            let geom = feature
                .geometry
                .ok_or_else(|| parse_error("Feature has no geometry"))?;
            Geometry::try_from(geom).map_err(parse_error)
        }
        GeoJson::FeatureCollection(collection) => {
            let members = collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .map(|geom| Geometry::try_from(geom).map_err(parse_error))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection::new_from(
                members,
            )))
        }
    }
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, MeshError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(parse_error)?;
    wkt.try_into()
        .map_err(|_| parse_error("WKT does not describe a supported geometry"))
}

/// Parses a geometry string and returns its lon/lat bounding rectangle.
///
/// Empty geometries have no extent and are rejected.
pub fn parse_extent(s: &str) -> Result<Rect<f64>, MeshError> {
    parse_geometry(s)?
        .bounding_rect()
        .ok_or_else(|| parse_error("geometry is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wkt_point() -> Result<(), MeshError> {
        let geom = parse_geometry("POINT(139.7671 35.6812)")?;
        let Geometry::Point(pt) = geom else {
            panic!("Expected Point");
        };
        assert!((pt.x() - 139.7671).abs() < 1e-9);
        assert!((pt.y() - 35.6812).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), MeshError> {
        let geom =
            parse_geometry("  POLYGON((139 35, 139 36, 140 36, 140 35, 139 35))  ")?;
        assert!(matches!(geom, Geometry::Polygon(_)));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_linestring() -> Result<(), MeshError> {
        let json = r#"{"type":"LineString","coordinates":[[139.70,35.65],[139.80,35.70]]}"#;
        let Geometry::LineString(line) = parse_geometry(json)? else {
            panic!("Expected LineString");
        };
        assert_eq!(line.0.len(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), MeshError> {
        let json = r#"{"type":"Feature","properties":{"name":"Tokyo"},
            "geometry":{"type":"Point","coordinates":[139.7671,35.6812]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));

        let empty = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_geometry(empty),
            Err(MeshError::GeometryParseError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection() -> Result<(), MeshError> {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[139.7,35.6]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[135.5,34.7]}}
        ]}"#;
        let Geometry::GeometryCollection(gc) = parse_geometry(json)? else {
            panic!("Expected GeometryCollection");
        };
        assert_eq!(gc.0.len(), 2);
        Ok(())
    }

    #[test]
    fn test_parse_extent() -> Result<(), MeshError> {
        let rect = parse_extent("LINESTRING(139.80 35.70, 139.70 35.65)")?;
        assert_eq!(rect.min().x, 139.70);
        assert_eq!(rect.min().y, 35.65);
        assert_eq!(rect.max().x, 139.80);
        assert_eq!(rect.max().y, 35.70);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_geometry("not a geometry"),
            Err(MeshError::GeometryParseError(_))
        ));
        assert!(matches!(
            parse_geometry("{\"type\":"),
            Err(MeshError::GeometryParseError(_))
        ));
    }
}
