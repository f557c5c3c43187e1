//! Face-conductivity precomputation.
//!
//! Every interior grid position `(ix, iy, iz)` in
//! `[0, nx-1) × [0, ny-1) × [0, nz-1)` owns one 3×3 coefficient block for
//! the three faces on the negative side of the *upper* cell
//! `(ix+1, iy+1, iz+1)`. Row `i` describes the face between the upper cell
//! and its neighbour at `-e_i`; column `j` is the contribution of the
//! gradient along axis `j`:
//!
//! ```text
//! coef[i][j] = sigma[i][j] · area[i] / spacing[j]
//! ```
//!
//! Boundary policy:
//! - upper cell not tissue → whole block zero;
//! - lower neighbour along `i` not tissue → row `i` zero;
//! - `i != j` and any of the four tangential stencil cells missing → that
//!   entry zero. Transverse gradients are never extrapolated.
//!
//! Layout is block-major: entry `(pos, i, j)` lives at `9·pos + 3·i + j`,
//! with `pos = iz + (nz-1)·(iy + (ny-1)·ix)`.

use tracing::debug;

use cardiac_core::Anatomy;
use cardiac_grid::{cross_stencil, BlockIndex, BoundingGrid, GridDims};

/// Precomputed face flux coefficients for one bounding grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceConductivity {
    dims: GridDims,
    values: Vec<f64>,
    suppressed_cross_terms: usize,
}

impl FaceConductivity {
    /// Compute coefficients for every face position of `grid`.
    ///
    /// `blocks` must come from mapping `anatomy` onto `grid`.
    pub fn precompute<A: Anatomy + ?Sized>(
        anatomy: &A,
        grid: &BoundingGrid,
        blocks: &BlockIndex,
    ) -> Self {
        let dims = grid.dims();
        let spacing = grid.spacing().as_array();
        let areas = grid.spacing().face_areas();
        let [fx, fy, fz] = dims.extents().map(|n| n - 1);

        let mut values = vec![0.0; dims.face_positions() * 9];
        let mut suppressed = 0usize;

        for ix in 0..fx {
            for iy in 0..fy {
                for iz in 0..fz {
                    let pos = iz + fz * (iy + fy * ix);
                    let upper = dims.index_of(ix + 1, iy + 1, iz + 1);
                    let Some(cell) = blocks.cell_at(upper) else {
                        continue;
                    };
                    let sigma = anatomy.conductivity(cell).to_matrix();
                    let block = &mut values[9 * pos..9 * pos + 9];

                    for idim in 0..3 {
                        let lower_is_tissue = dims
                            .step(upper, idim, -1)
                            .is_some_and(|g| blocks.is_tissue(g));
                        if !lower_is_tissue {
                            continue;
                        }
                        for jdim in 0..3 {
                            let base = sigma[idim][jdim] * areas[idim] / spacing[jdim];
                            let value = if idim == jdim {
                                base
                            } else {
                                let stencil = cross_stencil(&dims, upper, idim, jdim);
                                let complete = stencil.len() == 4
                                    && stencil.iter().all(|&g| blocks.is_tissue(g));
                                if complete {
                                    base
                                } else {
                                    if base != 0.0 {
                                        suppressed += 1;
                                    }
                                    0.0
                                }
                            };
                            block[3 * idim + jdim] = value;
                        }
                    }
                }
            }
        }

        debug!(
            positions = dims.face_positions(),
            suppressed_cross_terms = suppressed,
            "precomputed face conductivities"
        );

        Self {
            dims,
            values,
            suppressed_cross_terms: suppressed,
        }
    }

    /// Face position owned by grid cell `upper`, if it has one.
    ///
    /// Cells on a grid's low layer (any local coordinate zero) own no
    /// position.
    pub fn slot(dims: &GridDims, upper: usize) -> Option<usize> {
        let t = dims.decode(upper);
        if t.x == 0 || t.y == 0 || t.z == 0 {
            return None;
        }
        let [_, fy, fz] = dims.extents().map(|n| n - 1);
        let (ix, iy, iz) = (t.x as usize - 1, t.y as usize - 1, t.z as usize - 1);
        Some(iz + fz * (iy + fy * ix))
    }

    /// Flat offset of entry `(pos, i, j)`.
    #[inline]
    pub fn offset(pos: usize, i: usize, j: usize) -> usize {
        9 * pos + 3 * i + j
    }

    /// Coefficient `(i, j)` at face position `pos`.
    pub fn coefficient(&self, pos: usize, i: usize, j: usize) -> f64 {
        self.values[Self::offset(pos, i, j)]
    }

    /// The 3×3 block at face position `pos`.
    pub fn block(&self, pos: usize) -> [[f64; 3]; 3] {
        let b = &self.values[9 * pos..9 * pos + 9];
        [[b[0], b[1], b[2]], [b[3], b[4], b[5]], [b[6], b[7], b[8]]]
    }

    /// Number of face positions.
    pub fn positions(&self) -> usize {
        self.dims.face_positions()
    }

    /// Grid the coefficients were computed for.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Nonzero transverse terms dropped by the boundary policy.
    pub fn suppressed_cross_terms(&self) -> usize {
        self.suppressed_cross_terms
    }

    /// All coefficients in block-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Take the coefficient vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}
