use crate::error::MeshError;
use crate::index::detect::{detect_level, level_candidates};
use crate::index::level::MeshLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A standard area mesh code.
///
/// Concatenated fixed-width digit groups, one per level in the ancestor
/// chain. A `MeshCode` built through [`MeshCode::new`] or `parse` is known to
/// be all ASCII digits and of a length some level produces; the digit values
/// themselves are checked when the code is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeshCode(String);

impl MeshCode {
    /// Validates and wraps a code string.
    ///
    /// # Example
    /// ```
    /// use stdmesh_rs::MeshCode;
    ///
    /// let code = MeshCode::new("53393599").unwrap();
    /// assert_eq!(code.as_str(), "53393599");
    /// assert!(MeshCode::new("5339-599").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self, MeshError> {
        let code = code.into();
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MeshError::InvalidCode(code));
        }
        level_candidates(&code)?;
        Ok(Self(code))
    }

    /// Wraps digits produced by the encoder.
    pub(crate) fn from_encoded(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The level this code was written at, see [`detect_level`].
    pub fn level(&self) -> Result<MeshLevel, MeshError> {
        detect_level(&self.0)
    }

    /// The first `level.code_len()` characters, i.e. the code of the
    /// enclosing cell at a coarser level on the same chain.
    ///
    /// Returns `None` when `level` is not an ancestor of (or equal to) the
    /// given `own` level.
    pub fn truncate_to(&self, own: MeshLevel, level: MeshLevel) -> Option<MeshCode> {
        if !own.chain().contains(&level) || self.len() != own.code_len() {
            return None;
        }
        Some(Self(self.0[..level.code_len()].to_string()))
    }
}

impl fmt::Display for MeshCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MeshCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MeshCode {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MeshCode {
    type Error = MeshError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MeshCode> for String {
    fn from(code: MeshCode) -> Self {
        code.0
    }
}
