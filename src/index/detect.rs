use crate::error::MeshError;
use crate::index::constants::TWOFOLD_MARKER;
use crate::index::level::MeshLevel;

/// Lists every level a code of this shape could have been written at.
///
/// Only the length and, for 9-character codes, the last character are
/// inspected. Length 10 yields both `Quarter` and `Tenth`: the two levels
/// write different digit layouts into the same number of characters and the
/// code alone cannot tell them apart.
///
/// # Errors
///
/// [`MeshError::InvalidCode`] when no level produces a code of this shape.
pub fn level_candidates(code: &str) -> Result<&'static [MeshLevel], MeshError> {
    let bytes = code.as_bytes();
    match bytes.len() {
        4 => Ok(&[MeshLevel::Primary]),
        6 => Ok(&[MeshLevel::Secondary]),
        7 => Ok(&[MeshLevel::FiveFold]),
        8 => Ok(&[MeshLevel::Standard]),
        9 => match bytes[8] {
            TWOFOLD_MARKER => Ok(&[MeshLevel::TwoFold]),
            b'1'..=b'4' => Ok(&[MeshLevel::Half]),
            _ => Err(MeshError::InvalidCode(code.to_string())),
        },
        10 => Ok(&[MeshLevel::Quarter, MeshLevel::Tenth]),
        11 => Ok(&[MeshLevel::Eighth]),
        12 => Ok(&[MeshLevel::Twentieth]),
        _ => Err(MeshError::InvalidCode(code.to_string())),
    }
}

/// Infers the level of a mesh code from its length (and trailing digit).
///
/// | length | rule              | level       |
/// |--------|-------------------|-------------|
/// | 4      |                   | `Primary`   |
/// | 6      |                   | `Secondary` |
/// | 7      |                   | `FiveFold`  |
/// | 8      |                   | `Standard`  |
/// | 9      | ends in `5`       | `TwoFold`   |
/// | 9      | ends in `1`..`4`  | `Half`      |
/// | 10     | ambiguous         | error       |
/// | 11     |                   | `Eighth`    |
/// | 12     |                   | `Twentieth` |
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, detect_level};
///
/// assert_eq!(detect_level("5339").unwrap(), MeshLevel::Primary);
/// assert_eq!(detect_level("533935995").unwrap(), MeshLevel::TwoFold);
/// assert!(detect_level("5339359911").is_err());
/// ```
///
/// # Errors
///
/// - [`MeshError::InvalidCode`] - no level has this length/suffix
/// - [`MeshError::AmbiguousLevel`] - 10 characters, quarter or tenth
pub fn detect_level(code: &str) -> Result<MeshLevel, MeshError> {
    match level_candidates(code)? {
        [level] => Ok(*level),
        _ => Err(MeshError::AmbiguousLevel(code.to_string())),
    }
}
