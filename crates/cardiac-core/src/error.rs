//! Error types for anatomy input and driver configuration.

use std::error::Error;
use std::fmt;

/// Errors detected while building or validating an anatomy.
///
/// All of these are construction-time failures: an anatomy that fails
/// validation cannot be used to build a diffusion instance.
#[derive(Clone, Debug, PartialEq)]
pub enum AnatomyError {
    /// The anatomy contains no tissue cells.
    EmptyAnatomy,
    /// More local cells declared than cells present.
    LocalCountExceedsTotal {
        /// Declared number of local cells.
        n_local: usize,
        /// Total number of cells.
        n_cells: usize,
    },
    /// An axis spacing is zero, negative, or not finite.
    InvalidSpacing {
        /// Axis name (`dx`, `dy` or `dz`).
        axis: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A cell's conductivity tensor has a non-finite entry.
    InvalidConductivity {
        /// Index of the offending cell.
        cell: usize,
    },
    /// A cell index outside `[0, n_cells)`.
    CellIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Total number of cells.
        n_cells: usize,
    },
}

impl fmt::Display for AnatomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAnatomy => write!(f, "anatomy has no tissue cells"),
            Self::LocalCountExceedsTotal { n_local, n_cells } => {
                write!(f, "n_local {n_local} exceeds total cell count {n_cells}")
            }
            Self::InvalidSpacing { axis, value } => {
                write!(f, "spacing {axis} must be finite and positive, got {value}")
            }
            Self::InvalidConductivity { cell } => {
                write!(f, "cell {cell} has a non-finite conductivity tensor")
            }
            Self::CellIndexOutOfRange { index, n_cells } => {
                write!(f, "cell index {index} out of range for {n_cells} cells")
            }
        }
    }
}

impl Error for AnatomyError {}

/// Errors in driver configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An integer loop-type code with no corresponding mode.
    InvalidLoopType {
        /// The unrecognised code.
        code: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLoopType { code } => {
                write!(f, "unknown loop type code {code}, expected 0 or 1")
            }
        }
    }
}

impl Error for ConfigError {}
