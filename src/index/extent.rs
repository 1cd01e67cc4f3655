use crate::error::MeshError;
use crate::index::code::MeshCode;
use crate::index::encode::encode;
use crate::index::level::MeshLevel;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Where sampling along an axis stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtentBounds {
    /// Sample while `v <= max`. The cell of the far corner is missed when
    /// the extent is not a whole number of cells wide.
    Inclusive,
    /// Sample while `v < max + unit`, so the last sample lands at or past
    /// `max` and the far corner's cell is always covered.
    #[default]
    Padded,
}

/// How sample positions along an axis are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stepping {
    /// `v += unit` each step; rounding error accumulates over long runs.
    #[default]
    Accumulated,
    /// `v = min + k * unit`; no accumulation, but boundary samples can land
    /// in different cells than the accumulated walk.
    Indexed,
}

/// Options for [`cover_codes_with`] and [`par_cover_codes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtentOptions {
    pub bounds: ExtentBounds,
    pub stepping: Stepping,
    /// Drop repeated codes, keeping the first occurrence in scan order.
    pub dedup: bool,
}

impl ExtentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: ExtentBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    pub fn dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }
}

/// Sample positions along one axis.
#[derive(Debug, Clone)]
struct AxisSamples {
    min: f64,
    max: f64,
    unit: f64,
    options: ExtentOptions,
    index: u64,
    current: f64,
}

impl AxisSamples {
    fn new(min: f64, max: f64, unit: f64, options: ExtentOptions) -> Self {
        Self {
            min,
            max,
            unit,
            options,
            index: 0,
            current: min,
        }
    }
}

impl Iterator for AxisSamples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = match self.options.stepping {
            Stepping::Accumulated => self.current,
            Stepping::Indexed => self.min + self.index as f64 * self.unit,
        };
        let inside = match self.options.bounds {
            ExtentBounds::Inclusive => value <= self.max,
            ExtentBounds::Padded => value < self.max + self.unit,
        };
        if !inside {
            return None;
        }
        self.index += 1;
        self.current += self.unit;
        Some(value)
    }
}

/// Lazy row-major sequence of the mesh codes covering an extent.
///
/// Yields rows south to north, each row west to east. The first encoding
/// failure is yielded as an `Err` and ends the sequence.
#[derive(Debug, Clone)]
pub struct ExtentCodes {
    level: MeshLevel,
    dedup: bool,
    rows: AxisSamples,
    columns: AxisSamples,
    current_lat: Option<f64>,
    row: AxisSamples,
    seen: HashSet<MeshCode>,
    finished: bool,
}

impl ExtentCodes {
    fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        level: MeshLevel,
        options: ExtentOptions,
    ) -> Self {
        let (unit_lon, unit_lat) = level.unit_size();
        let valid = [min_lon, min_lat, max_lon, max_lat]
            .iter()
            .all(|v| v.is_finite())
            && min_lon <= max_lon
            && min_lat <= max_lat;

        debug!(
            %level, min_lon, min_lat, max_lon, max_lat, unit_lon, unit_lat, valid,
            "enumerating mesh codes over extent"
        );

        let columns = AxisSamples::new(min_lon, max_lon, unit_lon, options);
        Self {
            level,
            dedup: options.dedup,
            rows: AxisSamples::new(min_lat, max_lat, unit_lat, options),
            columns: columns.clone(),
            current_lat: None,
            row: columns,
            seen: HashSet::new(),
            finished: !valid,
        }
    }
}

impl Iterator for ExtentCodes {
    type Item = Result<MeshCode, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let lat = match self.current_lat {
                Some(lat) => lat,
                None => {
                    let Some(lat) = self.rows.next() else {
                        self.finished = true;
                        return None;
                    };
                    self.row = self.columns.clone();
                    self.current_lat = Some(lat);
                    lat
                }
            };

            let Some(lon) = self.row.next() else {
                self.current_lat = None;
                continue;
            };

            match encode(lon, lat, self.level) {
                Ok(code) => {
                    if self.dedup && !self.seen.insert(code.clone()) {
                        continue;
                    }
                    return Some(Ok(code));
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Enumerates the mesh codes covering `[min_lon, max_lon] x [min_lat, max_lat]`
/// with the default [`ExtentOptions`].
///
/// The sequence is recomputed from scratch on every call. Repeated codes are
/// kept; see [`cover_codes_with`] to drop them.
///
/// Sampling uses [`ExtentBounds::Padded`]: each axis is sampled while
/// `v < max + unit`, so the cell holding the far corner is always listed.
/// The last sample can land past `max`, which may add a row or column of
/// cells lying wholly outside the extent (an extent from `0.1` to `0.9`
/// cells wide also lists the cell starting at `1.0`). Pass
/// [`ExtentBounds::Inclusive`] to [`cover_codes_with`] to sample only while
/// `v <= max`.
///
/// # Example
/// ```
/// use stdmesh_rs::{MeshLevel, cover_codes};
///
/// let codes: Result<Vec<_>, _> =
///     cover_codes(139.70, 35.65, 139.80, 35.70, MeshLevel::Secondary).collect();
/// let codes = codes.unwrap();
/// assert!(codes.iter().any(|c| c.as_str() == "533946"));
/// ```
pub fn cover_codes(
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    level: MeshLevel,
) -> ExtentCodes {
    cover_codes_with(min_lon, min_lat, max_lon, max_lat, level, ExtentOptions::default())
}

/// Enumerates the mesh codes covering an extent with explicit options.
pub fn cover_codes_with(
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    level: MeshLevel,
    options: ExtentOptions,
) -> ExtentCodes {
    ExtentCodes::new(min_lon, min_lat, max_lon, max_lat, level, options)
}

/// Same output as [`cover_codes_with`], with each row encoded on the rayon
/// thread pool. Rows are merged back in south-to-north order.
pub fn par_cover_codes(
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    level: MeshLevel,
    options: ExtentOptions,
) -> Result<Vec<MeshCode>, MeshError> {
    let template = ExtentCodes::new(min_lon, min_lat, max_lon, max_lat, level, options);
    if template.finished {
        return Ok(Vec::new());
    }

    let lats: Vec<f64> = template.rows.clone().collect();
    debug!(%level, rows = lats.len(), "encoding extent rows in parallel");

    let rows: Vec<Vec<MeshCode>> = lats
        .par_iter()
        .map(|&lat| {
            template
                .columns
                .clone()
                .map(|lon| encode(lon, lat, level))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;

    let mut seen = HashSet::new();
    Ok(rows
        .into_iter()
        .flatten()
        .filter(|code| !options.dedup || seen.insert(code.clone()))
        .collect())
}
