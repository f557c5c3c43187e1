//! Bounding-box computation and the global→local transform.

use cardiac_core::{Anatomy, Spacing, Tuple};

use crate::dims::GridDims;
use crate::error::GridError;

/// Largest extent along one axis, so every box-local offset fits an `i32`.
const MAX_EXTENT: i64 = i32::MAX as i64;

fn extent(lower: [i64; 3], upper: [i64; 3]) -> [i64; 3] {
    [0, 1, 2].map(|axis| upper[axis] - lower[axis] + 1)
}

fn narrow(v: [i64; 3]) -> Option<Tuple> {
    Some(Tuple::new(
        i32::try_from(v[0]).ok()?,
        i32::try_from(v[1]).ok()?,
        i32::try_from(v[2]).ok()?,
    ))
}

fn to_extents(extent: [i64; 3]) -> [usize; 3] {
    extent.map(|e| usize::try_from(e).unwrap_or(usize::MAX))
}

/// Inclusive axis-aligned box in global lattice coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    lower: Tuple,
    upper: Tuple,
}

impl BoundingBox {
    /// The smallest box containing every cell of `anatomy` (local and
    /// remote), grown by `padding` cells on every side.
    ///
    /// Fails with [`GridError::GridTooLarge`] when a padded corner leaves
    /// the `i32` lattice or an extent exceeds `i32::MAX` cells.
    pub fn enclosing<A: Anatomy + ?Sized>(anatomy: &A, padding: u32) -> Result<Self, GridError> {
        let n = anatomy.size();
        if n == 0 {
            return Err(GridError::EmptyGrid {
                nx: 0,
                ny: 0,
                nz: 0,
            });
        }
        let first = anatomy.global_tuple(0);
        let (lower, upper) = (1..n)
            .map(|cell| anatomy.global_tuple(cell))
            .fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        let pad = i64::from(padding);
        let lo = lower.widen().map(|v| v - pad);
        let hi = upper.widen().map(|v| v + pad);
        let extent = extent(lo, hi);
        match (narrow(lo), narrow(hi)) {
            (Some(lower), Some(upper)) if extent.iter().all(|&e| e <= MAX_EXTENT) => {
                Ok(Self { lower, upper })
            }
            _ => {
                let [nx, ny, nz] = to_extents(extent);
                Err(GridError::GridTooLarge { nx, ny, nz })
            }
        }
    }

    /// Lowest corner (inclusive).
    pub fn lower(&self) -> Tuple {
        self.lower
    }

    /// Highest corner (inclusive).
    pub fn upper(&self) -> Tuple {
        self.upper
    }

    /// Grid dimensions spanned by the box.
    pub fn dims(&self) -> Result<GridDims, GridError> {
        let [nx, ny, nz] = to_extents(extent(self.lower.widen(), self.upper.widen()));
        GridDims::new(nx, ny, nz)
    }

    /// Transform a global coordinate into box-local coordinates, or `None`
    /// if the offset does not fit an `i32`.
    pub fn local_tuple(&self, global: Tuple) -> Option<Tuple> {
        global.checked_sub(self.lower)
    }
}

/// A dense grid placed in global coordinates, with physical spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingGrid {
    origin: Tuple,
    dims: GridDims,
    spacing: Spacing,
}

impl BoundingGrid {
    /// Create a grid with an explicit origin and dimensions.
    pub fn new(origin: Tuple, dims: GridDims, spacing: Spacing) -> Self {
        Self {
            origin,
            dims,
            spacing,
        }
    }

    /// The tightest grid around `anatomy`, grown by `padding` empty cells on
    /// every side. Spacing is taken from the anatomy.
    pub fn from_anatomy<A: Anatomy + ?Sized>(anatomy: &A, padding: u32) -> Result<Self, GridError> {
        let bbox = BoundingBox::enclosing(anatomy, padding)?;
        Ok(Self {
            origin: bbox.lower(),
            dims: bbox.dims()?,
            spacing: anatomy.spacing(),
        })
    }

    /// Global coordinate of local `(0, 0, 0)`.
    pub fn origin(&self) -> Tuple {
        self.origin
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Physical spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Transform a global coordinate into grid-local coordinates, or `None`
    /// if the offset does not fit an `i32`.
    pub fn local_tuple(&self, global: Tuple) -> Option<Tuple> {
        global.checked_sub(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardiac_core::{CellAnatomy, SymmetricTensor};

    fn anatomy(points: &[(i32, i32, i32)]) -> CellAnatomy {
        points
            .iter()
            .fold(CellAnatomy::builder(), |b, &(x, y, z)| {
                b.local(Tuple::new(x, y, z), SymmetricTensor::isotropic(1.0))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn box_is_tight() {
        let a = anatomy(&[(5, 10, -3), (7, 10, -1), (6, 12, -2)]);
        let bbox = BoundingBox::enclosing(&a, 0).unwrap();
        assert_eq!(bbox.lower(), Tuple::new(5, 10, -3));
        assert_eq!(bbox.upper(), Tuple::new(7, 12, -1));
        assert_eq!(bbox.dims().unwrap(), GridDims::new(3, 3, 3).unwrap());
        assert_eq!(
            bbox.local_tuple(Tuple::new(6, 11, -2)),
            Some(Tuple::new(1, 1, 1))
        );
    }

    #[test]
    fn single_cell_is_one_by_one_by_one() {
        let a = anatomy(&[(4, 4, 4)]);
        let grid = BoundingGrid::from_anatomy(&a, 0).unwrap();
        assert_eq!(grid.dims().len(), 1);
        assert_eq!(
            grid.local_tuple(Tuple::new(4, 4, 4)),
            Some(Tuple::new(0, 0, 0))
        );
    }

    #[test]
    fn padding_grows_every_side() {
        let a = anatomy(&[(0, 0, 0), (1, 2, 3)]);
        let grid = BoundingGrid::from_anatomy(&a, 1).unwrap();
        assert_eq!(grid.origin(), Tuple::new(-1, -1, -1));
        assert_eq!(grid.dims().extents(), [4, 5, 6]);
        assert_eq!(
            grid.local_tuple(Tuple::new(0, 0, 0)),
            Some(Tuple::new(1, 1, 1))
        );
    }

    #[test]
    fn remote_cells_are_enclosed() {
        let a = CellAnatomy::builder()
            .local(Tuple::new(0, 0, 0), SymmetricTensor::isotropic(1.0))
            .remote(Tuple::new(0, 0, 4), SymmetricTensor::isotropic(1.0))
            .build()
            .unwrap();
        let grid = BoundingGrid::from_anatomy(&a, 0).unwrap();
        assert_eq!(grid.dims().extents(), [1, 1, 5]);
    }

    #[test]
    fn lattice_extremes_are_too_large() {
        let a = anatomy(&[(i32::MIN, 0, 0), (i32::MAX, 0, 0)]);
        let err = BoundingGrid::from_anatomy(&a, 0).unwrap_err();
        assert_eq!(
            err,
            GridError::GridTooLarge {
                nx: 1 << 32,
                ny: 1,
                nz: 1
            }
        );
    }

    #[test]
    fn padding_past_lattice_edge_is_too_large() {
        let a = anatomy(&[(0, i32::MAX, 0)]);
        assert!(BoundingGrid::from_anatomy(&a, 0).is_ok());
        assert!(matches!(
            BoundingBox::enclosing(&a, 1),
            Err(GridError::GridTooLarge { nx: 3, ny: 3, nz: 3 })
        ));
    }

    #[test]
    fn far_coordinate_has_no_local_offset() {
        let a = anatomy(&[(i32::MAX - 1, 0, 0), (i32::MAX, 0, 0)]);
        let grid = BoundingGrid::from_anatomy(&a, 0).unwrap();
        assert_eq!(grid.local_tuple(Tuple::new(i32::MIN, 0, 0)), None);
        assert_eq!(
            grid.local_tuple(Tuple::new(i32::MAX, 0, 0)),
            Some(Tuple::new(1, 0, 0))
        );
    }
}
