//! Grid construction errors.

use std::error::Error;
use std::fmt;

use cardiac_core::{CellClass, Tuple};

/// Errors arising from bounding-grid construction or cell mapping.
///
/// All variants indicate inconsistent input geometry and are fatal at
/// construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid extent is zero.
    EmptyGrid {
        /// Extent along x.
        nx: usize,
        /// Extent along y.
        ny: usize,
        /// Extent along z.
        nz: usize,
    },
    /// An extent leaves the `i32` lattice or `nx·ny·nz` overflows.
    GridTooLarge {
        /// Extent along x.
        nx: usize,
        /// Extent along y.
        ny: usize,
        /// Extent along z.
        nz: usize,
    },
    /// A tissue cell's offset from the grid origin does not fit an `i32`.
    CoordinateOverflow {
        /// The offending cell index.
        cell: usize,
        /// Its global coordinate.
        global: Tuple,
        /// Global coordinate of the grid origin.
        origin: Tuple,
    },
    /// A tissue cell's local coordinate lies outside the grid.
    CellOutsideGrid {
        /// The offending cell index.
        cell: usize,
        /// Its local coordinate.
        local: Tuple,
        /// Grid dimensions as `nx×ny×nz`.
        dims: String,
    },
    /// Two distinct tissue cells map to the same grid index.
    IndexCollision {
        /// The shared grid index.
        grid_index: usize,
        /// The shared local coordinate.
        local: Tuple,
        /// The cell that claimed the index first.
        first: usize,
        /// Class of the first cell.
        first_class: CellClass,
        /// The colliding cell.
        second: usize,
        /// Class of the colliding cell.
        second_class: CellClass,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { nx, ny, nz } => {
                write!(f, "grid has an empty extent: {nx}x{ny}x{nz}")
            }
            Self::GridTooLarge { nx, ny, nz } => {
                write!(f, "grid {nx}x{ny}x{nz} overflows the index range")
            }
            Self::CoordinateOverflow {
                cell,
                global,
                origin,
            } => write!(
                f,
                "cell {cell} at {global} is too far from grid origin {origin}"
            ),
            Self::CellOutsideGrid { cell, local, dims } => {
                write!(f, "cell {cell} at local {local} lies outside grid {dims}")
            }
            Self::IndexCollision {
                grid_index,
                local,
                first,
                first_class,
                second,
                second_class,
            } => write!(
                f,
                "cells {first} ({first_class:?}) and {second} ({second_class:?}) \
                 both map to grid index {grid_index} at local {local}"
            ),
        }
    }
}

impl Error for GridError {}
