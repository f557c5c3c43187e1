//! Stencil neighbourhood helpers shared by the face precomputer and the
//! host reference kernel.

use smallvec::SmallVec;

use crate::dims::GridDims;

/// Grid cells needed to estimate the gradient along `tangent` on the face
/// between `upper` and its lower neighbour along `normal`.
///
/// The 4-point stencil is `upper ± e_tangent` and `upper - e_normal ±
/// e_tangent`. Only in-bounds cells are returned, in that order; a result
/// shorter than four means the stencil cannot be formed.
pub fn cross_stencil(
    dims: &GridDims,
    upper: usize,
    normal: usize,
    tangent: usize,
) -> SmallVec<[usize; 4]> {
    let mut result = SmallVec::new();
    let Some(lower) = dims.step(upper, normal, -1) else {
        return result;
    };
    for base in [upper, lower] {
        for delta in [-1, 1] {
            if let Some(g) = dims.step(base, tangent, delta) {
                result.push(g);
            }
        }
    }
    result
}
