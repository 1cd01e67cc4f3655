/// Error type for stdmesh-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The level tag is not one of the supported mesh levels.
    InvalidLevel(String),
    /// The mesh code has no matching level, contains non-digit characters,
    /// or carries a digit the level cannot produce.
    InvalidCode(String),
    /// The code length fits more than one level (10 digits: quarter or tenth).
    AmbiguousLevel(String),
    /// The coordinate is not finite or lies outside the codable range.
    InvalidCoordinate(f64, f64),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// Arrow array or record batch assembly failed.
    ArrowError(String),
    /// A grid builder was finished without a required setting.
    IncompleteBuilder(&'static str),
    /// Writing output failed.
    IoError(String),
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::InvalidLevel(level) => write!(f, "Invalid mesh level: {}", level),
            MeshError::InvalidCode(code) => write!(f, "Invalid mesh code: {}", code),
            MeshError::AmbiguousLevel(code) => write!(
                f,
                "Ambiguous mesh code: {} (quarter or tenth, pass the level explicitly)",
                code
            ),
            MeshError::InvalidCoordinate(lon, lat) => {
                write!(f, "Coordinate outside the mesh range: ({}, {})", lon, lat)
            }
            MeshError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            MeshError::ArrowError(msg) => write!(f, "Arrow error: {}", msg),
            MeshError::IncompleteBuilder(field) => {
                write!(f, "Grid builder is missing its {}", field)
            }
            MeshError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for MeshError {}
