//! Dense grid dimensions and linear indexing.

use std::fmt;

use cardiac_core::Tuple;

use crate::error::GridError;

/// Dimensions of a dense 3D grid.
///
/// Linear index of local coordinate `(x, y, z)` is `z + nz·(y + ny·x)`;
/// z is the fastest-varying axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// Fails if any extent is zero or the total cell count overflows `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyGrid { nx, ny, nz });
        }
        nx.checked_mul(ny)
            .and_then(|v| v.checked_mul(nz))
            .ok_or(GridError::GridTooLarge { nx, ny, nz })?;
        Ok(Self { nx, ny, nz })
    }

    /// Extent along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Extent along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Extent along z.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Extents in axis order.
    pub fn extents(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Always false; zero extents are rejected at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Linear-index stride of a unit step along each axis.
    pub fn offsets(&self) -> [usize; 3] {
        [self.ny * self.nz, self.nz, 1]
    }

    /// Number of interior face positions, `(nx-1)·(ny-1)·(nz-1)`.
    pub fn face_positions(&self) -> usize {
        (self.nx - 1) * (self.ny - 1) * (self.nz - 1)
    }

    /// Whether a local coordinate lies inside the grid.
    pub fn contains(&self, t: Tuple) -> bool {
        t.x >= 0
            && t.y >= 0
            && t.z >= 0
            && (t.x as usize) < self.nx
            && (t.y as usize) < self.ny
            && (t.z as usize) < self.nz
    }

    /// Linear index of a local coordinate, or `None` if outside the grid.
    pub fn index(&self, t: Tuple) -> Option<usize> {
        self.contains(t)
            .then(|| self.index_of(t.x as usize, t.y as usize, t.z as usize))
    }

    /// Linear index of in-bounds components.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        z + self.nz * (y + self.ny * x)
    }

    /// Decode a linear index back into a local coordinate.
    pub fn decode(&self, index: usize) -> Tuple {
        let z = index % self.nz;
        let rest = index / self.nz;
        let y = rest % self.ny;
        let x = rest / self.ny;
        Tuple::new(x as i32, y as i32, z as i32)
    }

    /// Linear index one step of `delta` along `axis` from `index`.
    ///
    /// Returns `None` when the step leaves the grid. Unlike raw offset
    /// arithmetic, a step off the end of one row never aliases into the
    /// next row.
    pub fn step(&self, index: usize, axis: usize, delta: i32) -> Option<usize> {
        let mut t = self.decode(index);
        match axis {
            0 => t.x += delta,
            1 => t.y += delta,
            2 => t.z += delta,
            _ => return None,
        }
        self.index(t)
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}
