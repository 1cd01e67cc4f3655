use crate::error::MeshError;
use crate::index::code::MeshCode;
use crate::index::constants::{LAT_SCALE, MAX_PRIMARY_INDEX, ORIGIN_LAT, ORIGIN_LON};
use crate::index::level::{DigitRule, MeshLevel};

impl DigitRule {
    /// Appends the local `(x, y)` cell index to `code`.
    pub(crate) fn write(self, code: &mut String, x: i64, y: i64) {
        match self {
            DigitRule::PrimaryPair => code.push_str(&format!("{:02}{:02}", y, x)),
            DigitRule::RowColumn => {
                push_digit(code, y);
                push_digit(code, x);
            }
            DigitRule::Quadrant => push_digit(code, x + y * 2 + 1),
            DigitRule::DoubledWithMarker => {
                push_digit(code, y * 2);
                push_digit(code, x * 2);
                code.push('5');
            }
        }
    }
}

fn push_digit(code: &mut String, digit: i64) {
    code.push(char::from(b'0' + digit as u8));
}

/// Encodes a lon/lat coordinate into the mesh code of the cell containing it.
///
/// Walks the level's ancestor chain from `Primary`, flooring the running
/// remainder (in primary-cell units) at each step.
///
/// A coordinate on an edge resolves to the cell east/north of it only while
/// the running remainder stays exact, as on primary edges or at 139.0/35.0
/// for every level. Otherwise the remainder left after subtracting each
/// step's index drifts below the edge, and the coordinate floors into the
/// cell west/south of it. Its decoded cell then ends at that coordinate
/// rather than containing it.
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, encode};
///
/// let code = encode(139.7671, 35.6812, MeshLevel::Standard).unwrap();
/// assert_eq!(code.as_str(), "53394611");
///
/// let half = encode(139.7671, 35.6812, MeshLevel::Half).unwrap();
/// assert!(half.as_str().starts_with("53394611"));
/// ```
///
/// # Errors
///
/// [`MeshError::InvalidCoordinate`] when the coordinate is not finite or the
/// primary row/column does not fit two digits (`100 <= lon < 200`,
/// `0 <= lat < 66.67`).
pub fn encode(lon: f64, lat: f64, level: MeshLevel) -> Result<MeshCode, MeshError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(MeshError::InvalidCoordinate(lon, lat));
    }

    let mut x = lon - ORIGIN_LON;
    let mut y = (lat - ORIGIN_LAT) * LAT_SCALE;
    let mut n_part = 1.0;
    let mut code = String::with_capacity(level.code_len());

    for step in level.chain() {
        let divisor = step.divisor() as i64;
        n_part *= divisor as f64;

        let mut xi = (x * n_part).floor() as i64;
        let mut yi = (y * n_part).floor() as i64;

        if *step == MeshLevel::Primary {
            if !(0..=MAX_PRIMARY_INDEX).contains(&xi) || !(0..=MAX_PRIMARY_INDEX).contains(&yi) {
                return Err(MeshError::InvalidCoordinate(lon, lat));
            }
        } else {
            // rounding can leave the remainder a hair outside the parent cell
            xi = xi.clamp(0, divisor - 1);
            yi = yi.clamp(0, divisor - 1);
        }

        step.digit_rule().write(&mut code, xi, yi);

        x -= xi as f64 / n_part;
        y -= yi as f64 / n_part;
    }

    Ok(MeshCode::from_encoded(code))
}
