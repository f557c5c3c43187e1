//! Diffusion and kernel error types.

use std::error::Error;
use std::fmt;

use cardiac_core::{AnatomyError, ConfigError};
use cardiac_grid::GridError;

/// Errors raised by a [`StencilKernel`](crate::StencilKernel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// A grid-sized argument has the wrong length.
    GridLength {
        /// Which argument.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A lookup entry points outside the grid.
    LookupOutOfRange {
        /// The cell whose entry is bad.
        cell: usize,
        /// The bad grid index.
        index: usize,
        /// Number of grid cells.
        grid_len: usize,
    },
    /// The output array cannot hold every local cell, or is longer than
    /// the cell count.
    OutputLength {
        /// Number of local cells.
        n_local: usize,
        /// Total number of cells.
        n_cells: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Backend-specific failure (launch error, device fault).
    DeviceFailure {
        /// Backend description of the failure.
        reason: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridLength {
                what,
                expected,
                actual,
            } => write!(f, "{what} has length {actual}, expected {expected}"),
            Self::LookupOutOfRange {
                cell,
                index,
                grid_len,
            } => write!(
                f,
                "lookup entry {index} for cell {cell} outside grid of {grid_len} cells"
            ),
            Self::OutputLength {
                n_local,
                n_cells,
                actual,
            } => write!(
                f,
                "output has length {actual}, expected between {n_local} and {n_cells}"
            ),
            Self::DeviceFailure { reason } => write!(f, "device failure: {reason}"),
        }
    }
}

impl Error for KernelError {}

/// Errors from constructing or driving a diffusion instance.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffusionError {
    /// The anatomy is invalid.
    Anatomy(AnatomyError),
    /// A configuration value is invalid.
    Config(ConfigError),
    /// Bounding grid construction or cell mapping failed.
    Grid(GridError),
    /// The stencil kernel rejected its arguments or failed.
    Kernel(KernelError),
    /// A per-cell input array has the wrong length.
    LengthMismatch {
        /// Which input.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// The derivative output cannot hold every local cell, or is longer
    /// than the cell count.
    OutputLength {
        /// Number of local cells.
        n_local: usize,
        /// Total number of cells.
        n_cells: usize,
        /// Supplied length.
        actual: usize,
    },
}

impl fmt::Display for DiffusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anatomy(e) => write!(f, "anatomy: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} has length {actual}, expected {expected}"),
            Self::OutputLength {
                n_local,
                n_cells,
                actual,
            } => write!(
                f,
                "derivative output has length {actual}, expected between {n_local} and {n_cells}"
            ),
        }
    }
}

impl Error for DiffusionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Anatomy(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Kernel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AnatomyError> for DiffusionError {
    fn from(e: AnatomyError) -> Self {
        Self::Anatomy(e)
    }
}

impl From<ConfigError> for DiffusionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for DiffusionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<KernelError> for DiffusionError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}
