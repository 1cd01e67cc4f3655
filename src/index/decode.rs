use crate::cell::MeshCell;
use crate::error::MeshError;
use crate::index::code::MeshCode;
use crate::index::constants::{
    ORIGIN_LAT, ORIGIN_LON, PRIMARY_UNIT_LAT, PRIMARY_UNIT_LON, TWOFOLD_MARKER,
};
use crate::index::detect::{detect_level, level_candidates};
use crate::index::level::{DigitRule, MeshLevel};

impl DigitRule {
    /// Reads the local `(x, y)` cell index back out of one digit group.
    ///
    /// Returns `None` for digits the rule never writes for a parent split
    /// `divisor` ways.
    pub(crate) fn read(self, group: &[u8], divisor: u32) -> Option<(u32, u32)> {
        let digit = |i: usize| -> u32 { (group[i] - b'0') as u32 };
        match self {
            DigitRule::PrimaryPair => Some((digit(2) * 10 + digit(3), digit(0) * 10 + digit(1))),
            DigitRule::RowColumn => {
                let (y, x) = (digit(0), digit(1));
                (x < divisor && y < divisor).then_some((x, y))
            }
            DigitRule::Quadrant => match digit(0) {
                q @ 1..=4 => Some(((q - 1) % 2, (q - 1) / 2)),
                _ => None,
            },
            DigitRule::DoubledWithMarker => {
                let (y2, x2) = (digit(0), digit(1));
                let valid = group[2] == TWOFOLD_MARKER
                    && x2 % 2 == 0
                    && y2 % 2 == 0
                    && x2 < divisor * 2
                    && y2 < divisor * 2;
                valid.then_some((x2 / 2, y2 / 2))
            }
        }
    }
}

/// Decodes a mesh code into the cell it denotes, detecting the level from
/// the code itself.
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, decode};
///
/// let cell = decode("53394611").unwrap();
/// assert_eq!(cell.level, MeshLevel::Standard);
/// assert!((cell.min_lon - 139.7625).abs() < 1e-9);
/// assert!((cell.min_lat - 35.675).abs() < 1e-9);
/// ```
///
/// # Errors
///
/// - [`MeshError::InvalidCode`] - unknown length, non-digits, or impossible digits
/// - [`MeshError::AmbiguousLevel`] - 10-digit codes, use [`decode_with_level`]
pub fn decode(code: &str) -> Result<MeshCell, MeshError> {
    let level = detect_level(code)?;
    decode_with_level(code, level)
}

/// Decodes a mesh code at an explicitly given level.
///
/// This is the only way to decode `Quarter` and `Tenth` codes, which share a
/// length. The code must have the canonical length for `level` and a shape
/// that level can produce.
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, decode_with_level};
///
/// let quarter = decode_with_level("5339461132", MeshLevel::Quarter).unwrap();
/// let tenth = decode_with_level("5339461132", MeshLevel::Tenth).unwrap();
/// assert!(quarter.min_lon != tenth.min_lon);
/// ```
pub fn decode_with_level(code: &str, level: MeshLevel) -> Result<MeshCell, MeshError> {
    let invalid = || MeshError::InvalidCode(code.to_string());
    let bytes = code.as_bytes();

    if bytes.len() != level.code_len() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    if !level_candidates(code)?.contains(&level) {
        return Err(invalid());
    }

    let mut unit_lon = PRIMARY_UNIT_LON;
    let mut unit_lat = PRIMARY_UNIT_LAT;
    let mut min_lon = ORIGIN_LON;
    let mut min_lat = ORIGIN_LAT;
    let mut offset = 0;

    for (i, step) in level.chain().iter().enumerate() {
        if i > 0 {
            let d = step.divisor() as f64;
            unit_lon /= d;
            unit_lat /= d;
        }

        let rule = step.digit_rule();
        let group = &bytes[offset..offset + rule.width()];
        offset += rule.width();

        let (x, y) = rule.read(group, step.divisor()).ok_or_else(invalid)?;
        min_lon += x as f64 * unit_lon;
        min_lat += y as f64 * unit_lat;
    }

    Ok(MeshCell::new(
        MeshCode::from_encoded(code.to_string()),
        level,
        min_lon,
        min_lat,
        min_lon + unit_lon,
        min_lat + unit_lat,
    ))
}

/// Renders a cell as a WKT polygon.
///
/// The ring runs SW, NW, NE, SE and closes back on SW, coordinates written
/// as `lon lat`:
///
/// ```text
/// POLYGON((minlon minlat, minlon maxlat, maxlon maxlat, maxlon minlat, minlon minlat))
/// ```
pub fn to_wkt(cell: &MeshCell) -> String {
    let (w, s, e, n) = (cell.min_lon, cell.min_lat, cell.max_lon, cell.max_lat);
    format!(
        "POLYGON(({w} {s}, {w} {n}, {e} {n}, {e} {s}, {w} {s}))",
        w = w,
        s = s,
        e = e,
        n = n
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::encode::encode;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_decode_standard() -> Result<(), MeshError> {
        let cell = decode("53394611")?;
        assert_eq!(cell.level, MeshLevel::Standard);
        assert!((cell.min_lon - 139.7625).abs() < EPS);
        assert!((cell.min_lat - 35.675).abs() < EPS);
        assert!((cell.max_lon - 139.775).abs() < EPS);
        assert!((cell.max_lat - 35.683333333).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_decode_is_floor_aligned_on_boundary() -> Result<(), MeshError> {
        let code = encode(139.0, 35.0, MeshLevel::Standard)?;
        let cell = decode(code.as_str())?;
        let (unit_lon, _) = MeshLevel::Standard.unit_size();

        let steps = ((cell.min_lon - 100.0) / unit_lon).round();
        assert!((100.0 + steps * unit_lon - cell.min_lon).abs() < EPS);
        assert!((cell.min_lon - 139.0).abs() < EPS);
        assert!(cell.max_lon - 139.0 > unit_lon * 0.5);
        assert!((cell.min_lat - 35.0).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_quadrant_offsets() -> Result<(), MeshError> {
        let base = decode("53394611")?;
        let (w, h) = MeshLevel::Half.unit_size();

        let sw = decode("533946111")?;
        let se = decode("533946112")?;
        let nw = decode("533946113")?;
        let ne = decode("533946114")?;

        assert!((sw.min_lon - base.min_lon).abs() < EPS);
        assert!((sw.min_lat - base.min_lat).abs() < EPS);
        assert!((se.min_lon - (base.min_lon + w)).abs() < EPS);
        assert!((se.min_lat - base.min_lat).abs() < EPS);
        assert!((nw.min_lon - base.min_lon).abs() < EPS);
        assert!((nw.min_lat - (base.min_lat + h)).abs() < EPS);
        assert!((ne.min_lon - (base.min_lon + w)).abs() < EPS);
        assert!((ne.min_lat - (base.min_lat + h)).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_twofold_cell() -> Result<(), MeshError> {
        let secondary = decode("533946")?;
        let cell = decode("533946245")?;
        let (w, h) = MeshLevel::TwoFold.unit_size();

        assert_eq!(cell.level, MeshLevel::TwoFold);
        assert!((cell.min_lon - (secondary.min_lon + 2.0 * w)).abs() < EPS);
        assert!((cell.min_lat - (secondary.min_lat + h)).abs() < EPS);
        assert!((cell.max_lon - cell.min_lon - w).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_fivefold_cell() -> Result<(), MeshError> {
        let secondary = decode("533946")?;
        let cell = decode("5339464")?;
        let (w, h) = MeshLevel::FiveFold.unit_size();

        assert_eq!(cell.level, MeshLevel::FiveFold);
        assert!((cell.min_lon - (secondary.min_lon + w)).abs() < EPS);
        assert!((cell.min_lat - (secondary.min_lat + h)).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_quarter_and_tenth_need_explicit_level() -> Result<(), MeshError> {
        assert!(matches!(
            decode("5339461132"),
            Err(MeshError::AmbiguousLevel(_))
        ));

        let quarter = decode_with_level("5339461132", MeshLevel::Quarter)?;
        let tenth = decode_with_level("5339461132", MeshLevel::Tenth)?;
        assert_eq!(quarter.level, MeshLevel::Quarter);
        assert_eq!(tenth.level, MeshLevel::Tenth);
        assert!(quarter.width() > tenth.width());
        Ok(())
    }

    #[test]
    fn test_tenth_and_twentieth() -> Result<(), MeshError> {
        let standard = decode("53394611")?;
        let tenth = decode_with_level("5339461173", MeshLevel::Tenth)?;
        let (w, h) = MeshLevel::Tenth.unit_size();
        assert!((tenth.min_lon - (standard.min_lon + 3.0 * w)).abs() < EPS);
        assert!((tenth.min_lat - (standard.min_lat + 7.0 * h)).abs() < EPS);

        let twentieth = decode("533946117301")?;
        assert_eq!(twentieth.level, MeshLevel::Twentieth);
        let (w20, _) = MeshLevel::Twentieth.unit_size();
        assert!((twentieth.min_lon - (tenth.min_lon + w20)).abs() < EPS);
        assert!((twentieth.min_lat - tenth.min_lat).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_rejects_impossible_digits() {
        // secondary digits run 0-7
        assert!(matches!(decode("533986"), Err(MeshError::InvalidCode(_))));
        // quadrant digit 0
        assert!(matches!(
            decode_with_level("5339461102", MeshLevel::Quarter),
            Err(MeshError::InvalidCode(_))
        ));
        // odd two-fold digit
        assert!(matches!(decode("533946315"), Err(MeshError::InvalidCode(_))));
        // twentieth digits run 0-1
        assert!(matches!(decode("533946117321"), Err(MeshError::InvalidCode(_))));
        // non-digit
        assert!(matches!(decode("5339a611"), Err(MeshError::InvalidCode(_))));
    }

    #[test]
    fn test_explicit_level_must_match_shape() {
        assert!(matches!(
            decode_with_level("53394611", MeshLevel::Half),
            Err(MeshError::InvalidCode(_))
        ));
        assert!(matches!(
            decode_with_level("533946115", MeshLevel::Half),
            Err(MeshError::InvalidCode(_))
        ));
        assert!(matches!(
            decode_with_level("533946113", MeshLevel::TwoFold),
            Err(MeshError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_to_wkt_vertex_order() -> Result<(), MeshError> {
        let cell = decode("52394000")?;
        assert_eq!(
            to_wkt(&cell),
            "POLYGON((139 35, 139 35.00833333333333, 139.0125 35.00833333333333, \
             139.0125 35, 139 35))"
        );
        Ok(())
    }
}
