use crate::error::MeshError;
use crate::index::constants::{PRIMARY_UNIT_LAT, PRIMARY_UNIT_LON};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of a standard area mesh cell.
///
/// Every level hangs off exactly one parent, so each level has a single
/// ancestor chain back to [`MeshLevel::Primary`]. `FiveFold` and `TwoFold`
/// branch off `Secondary` and never share a chain with `Standard` and below.
///
/// Levels (de)serialise as the short tags used by mesh tooling
/// (`"1"`, `"2"`, `"3"`, `"5x"`, `"2x"`, `"half"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeshLevel {
    /// 1st mesh, 1° x 40'
    Primary,
    /// 2nd mesh, primary split 8 x 8
    Secondary,
    /// 3rd mesh, secondary split 10 x 10
    Standard,
    /// 1/2 mesh, standard split into quadrants
    Half,
    /// 1/4 mesh, half split into quadrants
    Quarter,
    /// 1/8 mesh, quarter split into quadrants
    Eighth,
    /// 5x mesh, secondary split into quadrants
    FiveFold,
    /// 2x mesh, secondary split 5 x 5
    TwoFold,
    /// 1/10 subdivision, standard split 10 x 10
    Tenth,
    /// 1/20 subdivision, tenth split 2 x 2 with row/column digits
    Twentieth,
}

/// How a level writes its local cell index into the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitRule {
    /// Two zero-padded 2-digit groups, row then column.
    PrimaryPair,
    /// One digit for the row, one for the column.
    RowColumn,
    /// A single digit `x + 2y + 1`, 1 = SW, 2 = SE, 3 = NW, 4 = NE.
    Quadrant,
    /// Row and column doubled (0, 2, 4, 6, 8) followed by the `5` marker.
    DoubledWithMarker,
}

impl DigitRule {
    /// Number of characters this rule contributes to a code.
    pub fn width(self) -> usize {
        match self {
            DigitRule::PrimaryPair => 4,
            DigitRule::RowColumn => 2,
            DigitRule::Quadrant => 1,
            DigitRule::DoubledWithMarker => 3,
        }
    }
}

use MeshLevel::*;

impl MeshLevel {
    /// Every supported level, coarsest first within each branch.
    pub const ALL: [MeshLevel; 10] = [
        Primary, Secondary, Standard, Half, Quarter, Eighth, FiveFold, TwoFold, Tenth, Twentieth,
    ];

    /// The level this one subdivides, `None` for `Primary`.
    pub fn parent(self) -> Option<MeshLevel> {
        match self {
            Primary => None,
            Secondary => Some(Primary),
            Standard | FiveFold | TwoFold => Some(Secondary),
            Half | Tenth => Some(Standard),
            Quarter => Some(Half),
            Eighth => Some(Quarter),
            Twentieth => Some(Tenth),
        }
    }

    /// Number of divisions per axis relative to the parent cell.
    pub fn divisor(self) -> u32 {
        match self {
            Primary => 1,
            Secondary => 8,
            Standard | Tenth => 10,
            TwoFold => 5,
            Half | Quarter | Eighth | FiveFold | Twentieth => 2,
        }
    }

    /// Ancestor chain from `Primary` down to and including this level.
    pub fn chain(self) -> &'static [MeshLevel] {
        match self {
            Primary => &[Primary],
            Secondary => &[Primary, Secondary],
            Standard => &[Primary, Secondary, Standard],
            Half => &[Primary, Secondary, Standard, Half],
            Quarter => &[Primary, Secondary, Standard, Half, Quarter],
            Eighth => &[Primary, Secondary, Standard, Half, Quarter, Eighth],
            FiveFold => &[Primary, Secondary, FiveFold],
            TwoFold => &[Primary, Secondary, TwoFold],
            Tenth => &[Primary, Secondary, Standard, Tenth],
            Twentieth => &[Primary, Secondary, Standard, Tenth, Twentieth],
        }
    }

    pub fn digit_rule(self) -> DigitRule {
        match self {
            Primary => DigitRule::PrimaryPair,
            Secondary | Standard | Tenth | Twentieth => DigitRule::RowColumn,
            Half | Quarter | Eighth | FiveFold => DigitRule::Quadrant,
            TwoFold => DigitRule::DoubledWithMarker,
        }
    }

    /// Canonical length of a code at this level.
    pub fn code_len(self) -> usize {
        self.chain().iter().map(|l| l.digit_rule().width()).sum()
    }

    /// Cell size `(unit_lon, unit_lat)` in degrees.
    pub fn unit_size(self) -> (f64, f64) {
        self.chain()
            .iter()
            .skip(1)
            .fold((PRIMARY_UNIT_LON, PRIMARY_UNIT_LAT), |(lon, lat), l| {
                let d = l.divisor() as f64;
                (lon / d, lat / d)
            })
    }

    /// Short tag for this level.
    pub fn tag(self) -> &'static str {
        match self {
            Primary => "1",
            Secondary => "2",
            Standard => "3",
            Half => "half",
            Quarter => "quarter",
            Eighth => "eighth",
            FiveFold => "5x",
            TwoFold => "2x",
            Tenth => "tenth",
            Twentieth => "twentieth",
        }
    }
}

/// Returns the `(unit_lon, unit_lat)` cell size in degrees for a level.
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, unit_size};
///
/// let (lon, lat) = unit_size(MeshLevel::Standard);
/// assert!((lon - 45.0 / 3600.0).abs() < 1e-12);
/// assert!((lat - 30.0 / 3600.0).abs() < 1e-12);
/// ```
pub fn unit_size(level: MeshLevel) -> (f64, f64) {
    level.unit_size()
}

impl fmt::Display for MeshLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MeshLevel {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "primary" => Ok(Primary),
            "2" | "secondary" => Ok(Secondary),
            "3" | "standard" => Ok(Standard),
            "half" => Ok(Half),
            "quarter" => Ok(Quarter),
            "eighth" => Ok(Eighth),
            "5x" | "fivefold" => Ok(FiveFold),
            "2x" | "twofold" => Ok(TwoFold),
            "tenth" => Ok(Tenth),
            "twentieth" => Ok(Twentieth),
            _ => Err(MeshError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for MeshLevel {
    type Error = MeshError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeshLevel> for String {
    fn from(level: MeshLevel) -> Self {
        level.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-15, "{} != {}", a, b);
    }

    #[test]
    fn test_chained_unit_sizes() {
        let ratio = |child: MeshLevel, parent: MeshLevel, d: f64| {
            let (clon, clat) = child.unit_size();
            let (plon, plat) = parent.unit_size();
            assert_close(clon, plon / d);
            assert_close(clat, plat / d);
        };

        assert_eq!(Primary.unit_size(), (1.0, 1.0 / 1.5));
        ratio(Secondary, Primary, 8.0);
        ratio(Standard, Secondary, 10.0);
        ratio(Half, Standard, 2.0);
        ratio(Quarter, Half, 2.0);
        ratio(Eighth, Quarter, 2.0);
        ratio(FiveFold, Secondary, 2.0);
        ratio(TwoFold, Secondary, 5.0);
        ratio(Tenth, Standard, 10.0);
        ratio(Twentieth, Tenth, 2.0);
    }

    #[test]
    fn test_code_lengths() {
        let expected = [
            (Primary, 4),
            (Secondary, 6),
            (Standard, 8),
            (FiveFold, 7),
            (TwoFold, 9),
            (Half, 9),
            (Quarter, 10),
            (Tenth, 10),
            (Eighth, 11),
            (Twentieth, 12),
        ];
        for (level, len) in expected {
            assert_eq!(level.code_len(), len, "{:?}", level);
        }
    }

    #[test]
    fn test_chain_matches_parent_links() {
        for level in MeshLevel::ALL {
            let chain = level.chain();
            assert_eq!(chain[0], Primary);
            assert_eq!(*chain.last().unwrap(), level);
            for pair in chain.windows(2) {
                assert_eq!(pair[1].parent(), Some(pair[0]));
            }
        }
    }

    #[test]
    fn test_integrated_branch_never_contains_standard() {
        for level in [FiveFold, TwoFold] {
            assert!(!level.chain().contains(&Standard));
        }
        for level in [Half, Quarter, Eighth, Tenth, Twentieth] {
            assert!(!level.chain().contains(&FiveFold));
            assert!(!level.chain().contains(&TwoFold));
        }
    }

    #[test]
    fn test_parse_tags_and_names() -> Result<(), MeshError> {
        for level in MeshLevel::ALL {
            assert_eq!(level.tag().parse::<MeshLevel>()?, level);
            assert_eq!(format!("{:?}", level).parse::<MeshLevel>()?, level);
        }
        assert_eq!(" 5X ".parse::<MeshLevel>()?, FiveFold);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let result = "sixteenth".parse::<MeshLevel>();
        assert_eq!(result, Err(MeshError::InvalidLevel("sixteenth".to_string())));
        assert!("4".parse::<MeshLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_tags() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&vec![Standard, FiveFold, Half])?;
        assert_eq!(json, r#"["3","5x","half"]"#);

        let back: Vec<MeshLevel> = serde_json::from_str(&json)?;
        assert_eq!(back, vec![Standard, FiveFold, Half]);

        let bad: Result<MeshLevel, _> = serde_json::from_str(r#""3x""#);
        assert!(bad.is_err());
        Ok(())
    }
}
