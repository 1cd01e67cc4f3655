pub mod constants;
mod code;
mod decode;
mod detect;
mod encode;
mod extent;
mod level;

pub use code::MeshCode;
pub use constants::{ORIGIN_LAT, ORIGIN_LON, PRIMARY_UNIT_LAT, PRIMARY_UNIT_LON, TWOFOLD_MARKER};
pub use decode::{decode, decode_with_level, to_wkt};
pub use detect::{detect_level, level_candidates};
pub use encode::encode;
pub use extent::{
    ExtentBounds, ExtentCodes, ExtentOptions, Stepping, cover_codes, cover_codes_with,
    par_cover_codes,
};
pub use level::{DigitRule, MeshLevel, unit_size};
