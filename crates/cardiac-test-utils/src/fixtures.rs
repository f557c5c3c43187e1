//! Reusable anatomy fixtures.
//!
//! - [`solid_block`]: every lattice point of an `nx × ny × nz` block is tissue.
//! - [`block_with_holes`]: a solid block with selected points removed.
//! - [`split_block`]: a solid block whose cells with `x >= split_x` are remote.
//! - [`random_tissue`]: seeded random occupancy, conductivity and ownership.

use cardiac_core::{CellAnatomy, CellClass, Spacing, SymmetricTensor, Tuple};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn block_points(nx: i32, ny: i32, nz: i32) -> impl Iterator<Item = Tuple> {
    (0..nx).flat_map(move |x| (0..ny).flat_map(move |y| (0..nz).map(move |z| Tuple::new(x, y, z))))
}

/// All points of an `nx × ny × nz` block, local, unit spacing.
pub fn solid_block(nx: i32, ny: i32, nz: i32, sigma: SymmetricTensor) -> CellAnatomy {
    block_with_holes(nx, ny, nz, &[], sigma)
}

/// A solid block with `holes` left empty.
///
/// # Panics
///
/// Panics if every point is a hole.
pub fn block_with_holes(
    nx: i32,
    ny: i32,
    nz: i32,
    holes: &[Tuple],
    sigma: SymmetricTensor,
) -> CellAnatomy {
    block_points(nx, ny, nz)
        .filter(|t| !holes.contains(t))
        .fold(CellAnatomy::builder(), |b, t| b.local(t, sigma))
        .build()
        .expect("fixture block must contain tissue")
}

/// A solid block where cells with `x >= split_x` belong to a neighbouring
/// partition.
pub fn split_block(nx: i32, ny: i32, nz: i32, split_x: i32, sigma: SymmetricTensor) -> CellAnatomy {
    block_points(nx, ny, nz)
        .fold(CellAnatomy::builder(), |b, t| {
            let class = if t.x < split_x {
                CellClass::Local
            } else {
                CellClass::Remote
            };
            b.cell(class, t, sigma)
        })
        .build()
        .expect("fixture block must contain tissue")
}

/// Uniform sample in `[0, 1)`.
pub fn uniform_rng(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// A random, diagonally dominant conductivity tensor.
pub fn random_conductivity(rng: &mut ChaCha8Rng) -> SymmetricTensor {
    let diag = |rng: &mut ChaCha8Rng| 0.5 + uniform_rng(rng);
    let off = |rng: &mut ChaCha8Rng| 0.2 * (uniform_rng(rng) - 0.5);
    let (a11, a22, a33) = (diag(rng), diag(rng), diag(rng));
    let (a12, a13, a23) = (off(rng), off(rng), off(rng));
    SymmetricTensor::new(a11, a12, a13, a22, a23, a33)
}

/// Seeded random tissue inside an `extents` block.
///
/// Each point is tissue with probability `fill`; each tissue point is
/// remote with probability `remote_fraction`. The origin point is always
/// local tissue, so the result is never empty and always has a local cell.
/// Spacing is drawn from `[0.5, 1.5)` per axis.
pub fn random_tissue(seed: u64, extents: [i32; 3], fill: f64, remote_fraction: f64) -> CellAnatomy {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let spacing = Spacing::new(
        0.5 + uniform_rng(&mut rng),
        0.5 + uniform_rng(&mut rng),
        0.5 + uniform_rng(&mut rng),
    )
    .expect("spacing drawn from a positive range");

    let mut builder = CellAnatomy::builder().spacing(spacing);
    for t in block_points(extents[0], extents[1], extents[2]) {
        let origin = t == Tuple::default();
        if !origin && uniform_rng(&mut rng) >= fill {
            continue;
        }
        let class = if !origin && uniform_rng(&mut rng) < remote_fraction {
            CellClass::Remote
        } else {
            CellClass::Local
        };
        let sigma = random_conductivity(&mut rng);
        builder = builder.cell(class, t, sigma);
    }
    builder.build().expect("origin cell is always present")
}
