//! TSPLIB distance formulas.
//!
//! Pure functions of two same-dimensioned coordinates. Every formula
//! returns an integral `f64` — TSPLIB distances are whole numbers by
//! definition — and fails on a dimensionality mismatch. The default
//! rounding is nearest-integer via `floor(x + 0.5)`; formulas that need
//! ceiling or floor rounding say so.
//!
//! [`WeightKind`] is the closed table from `EDGE_WEIGHT_TYPE` keywords
//! to formulas; an unknown keyword is an explicit error, never a silent
//! lookup miss.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use smallvec::SmallVec;
use std::error::Error;
use std::fmt;

/// A node coordinate: two or three axes in the standard format.
pub type Coord = SmallVec<[f64; 3]>;

/// Errors from distance evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistanceError {
    /// The two coordinates differ in dimensionality.
    DimensionMismatch {
        /// Dimensionality of the first coordinate.
        left: usize,
        /// Dimensionality of the second coordinate.
        right: usize,
    },
    /// A formula requires a fixed dimensionality the coordinates lack.
    WrongDimension {
        /// Required dimensionality.
        expected: usize,
        /// Actual dimensionality.
        found: usize,
    },
    /// An `EDGE_WEIGHT_TYPE` keyword names no known formula.
    UnknownWeightType {
        /// The offending keyword.
        keyword: String,
    },
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { left, right } => {
                write!(f, "coordinate dimensionality mismatch: {left} vs {right}")
            }
            Self::WrongDimension { expected, found } => {
                write!(f, "formula requires {expected}D coordinates, got {found}D")
            }
            Self::UnknownWeightType { keyword } => {
                write!(f, "unknown edge weight type '{keyword}'")
            }
        }
    }
}

impl Error for DistanceError {}

/// Nearest-integer rounding, ties away from zero: `floor(x + 0.5)`.
pub fn nint(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn deltas(start: &[f64], end: &[f64]) -> Result<Vec<f64>, DistanceError> {
    if start.len() != end.len() {
        return Err(DistanceError::DimensionMismatch {
            left: start.len(),
            right: end.len(),
        });
    }
    Ok(start.iter().zip(end).map(|(s, e)| e - s).collect())
}

/// Euclidean distance, rounded to the nearest integer.
pub fn euclidean(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    let square_sum: f64 = deltas(start, end)?.iter().map(|d| d * d).sum();
    Ok(nint(square_sum.sqrt()))
}

/// Euclidean distance, rounded up.
pub fn euclidean_ceil(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    let square_sum: f64 = deltas(start, end)?.iter().map(|d| d * d).sum();
    Ok(square_sum.sqrt().ceil())
}

/// Manhattan (rectilinear) distance, rounded to the nearest integer.
pub fn manhattan(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    let total: f64 = deltas(start, end)?.iter().map(|d| d.abs()).sum();
    Ok(nint(total))
}

/// Maximum (Chebyshev) distance, rounded to the nearest integer.
pub fn maximum(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    let largest = deltas(start, end)?
        .iter()
        .map(|d| d.abs())
        .fold(0.0_f64, f64::max);
    Ok(nint(largest))
}

/// Mean Earth radius used by [`geographical`], in kilometres.
pub const EARTH_RADIUS: f64 = 6378.388;

/// Decode a packed `degrees.minutes` value into fractional degrees.
///
/// The integer part is whole degrees; the fractional part times `5/3`
/// is the minutes expressed as a degree fraction.
fn parse_degrees(coord: f64) -> f64 {
    let degrees = nint(coord);
    let minutes = coord - degrees;
    degrees + minutes * 5.0 / 3.0
}

/// Geographical great-circle distance over packed lat/lng coordinates,
/// rounded down to an integer number of kilometres.
pub fn geographical(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    // touch the deltas only for the dimensionality check
    deltas(start, end)?;
    if start.len() != 2 {
        return Err(DistanceError::WrongDimension {
            expected: 2,
            found: start.len(),
        });
    }
    let lat1 = parse_degrees(start[0]).to_radians();
    let lng1 = parse_degrees(start[1]).to_radians();
    let lat2 = parse_degrees(end[0]).to_radians();
    let lng2 = parse_degrees(end[1]).to_radians();

    let q1 = (lng1 - lng2).cos();
    let q2 = (lat1 - lat2).cos();
    let q3 = (lat1 + lat2).cos();
    let distance = EARTH_RADIUS * (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).acos() + 1.0;
    Ok(distance.floor())
}

/// Pseudo-Euclidean ("ATT") distance.
///
/// The reported distance never undercounts the true value: when the
/// nearest-integer rounding falls below `sqrt(sum / 10)`, the result is
/// bumped up by one.
pub fn pseudo_euclidean(start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
    let square_sum: f64 = deltas(start, end)?.iter().map(|d| d * d).sum();
    let value = (square_sum / 10.0).sqrt();
    let rounded = nint(value);
    Ok(if rounded < value { rounded + 1.0 } else { rounded })
}

/// Crystallography ("xray") distance for three-axis motor movement.
///
/// The first axis is periodic with a 360° wrap; each axis delta is
/// divided by that axis's speed, and the distance is
/// `round(100 * max(scaled deltas))`.
pub fn xray(start: &[f64], end: &[f64], speeds: [f64; 3]) -> Result<f64, DistanceError> {
    let deltas = deltas(start, end)?;
    if deltas.len() != 3 {
        return Err(DistanceError::WrongDimension {
            expected: 3,
            found: deltas.len(),
        });
    }
    let dx = deltas[0].abs();
    let dx = dx.min((dx - 360.0).abs());
    let dy = deltas[1].abs();
    let dz = deltas[2].abs();
    let largest = (dx / speeds[0]).max(dy / speeds[1]).max(dz / speeds[2]);
    Ok(nint(100.0 * largest))
}

/// Motor speeds for the `XRAY2` weight type.
pub const XRAY2_SPEEDS: [f64; 3] = [1.25, 1.5, 1.15];

/// The closed table of `EDGE_WEIGHT_TYPE` formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightKind {
    /// `EUC_2D` / `EUC_3D`: rounded Euclidean distance.
    Euclidean,
    /// `CEIL_2D`: Euclidean distance rounded up.
    CeilingEuclidean,
    /// `MAN_2D` / `MAN_3D`: rectilinear distance.
    Manhattan,
    /// `MAX_2D` / `MAX_3D`: Chebyshev distance.
    Maximum,
    /// `GEO`: great-circle distance over packed lat/lng.
    Geographical,
    /// `ATT`: pseudo-Euclidean distance.
    PseudoEuclidean,
    /// `XRAY1`: crystallography distance, unit motor speeds.
    Xray1,
    /// `XRAY2`: crystallography distance, per-axis motor speeds.
    Xray2,
}

impl WeightKind {
    /// Resolve an `EDGE_WEIGHT_TYPE` keyword.
    pub fn from_keyword(keyword: &str) -> Result<Self, DistanceError> {
        match keyword {
            "EUC_2D" | "EUC_3D" => Ok(Self::Euclidean),
            "CEIL_2D" => Ok(Self::CeilingEuclidean),
            "MAN_2D" | "MAN_3D" => Ok(Self::Manhattan),
            "MAX_2D" | "MAX_3D" => Ok(Self::Maximum),
            "GEO" => Ok(Self::Geographical),
            "ATT" => Ok(Self::PseudoEuclidean),
            "XRAY1" => Ok(Self::Xray1),
            "XRAY2" => Ok(Self::Xray2),
            _ => Err(DistanceError::UnknownWeightType {
                keyword: keyword.to_owned(),
            }),
        }
    }

    /// Evaluate the formula for two coordinates.
    pub fn distance(&self, start: &[f64], end: &[f64]) -> Result<f64, DistanceError> {
        match self {
            Self::Euclidean => euclidean(start, end),
            Self::CeilingEuclidean => euclidean_ceil(start, end),
            Self::Manhattan => manhattan(start, end),
            Self::Maximum => maximum(start, end),
            Self::Geographical => geographical(start, end),
            Self::PseudoEuclidean => pseudo_euclidean(start, end),
            Self::Xray1 => xray(start, end, [1.0, 1.0, 1.0]),
            Self::Xray2 => xray(start, end, XRAY2_SPEEDS),
        }
    }
}
