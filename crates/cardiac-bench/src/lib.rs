//! Benchmark profiles for the cardiac diffusion workspace.
//!
//! - [`slab_profile`]: a solid, fibre-aligned block of tissue
//! - [`sparse_profile`]: seeded random tissue with a halo fraction
//! - [`resting_voltages`]: a deterministic voltage field for any anatomy

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cardiac_core::{Anatomy, CellAnatomy, Spacing, SymmetricTensor, Tuple};
use cardiac_diffusion::{DiffusionConfig, DiffusionError, GridDiffusion};
use cardiac_test_utils::random_tissue;

/// Build an `n × n × n` solid block with fibres along x and 0.25 mm spacing.
pub fn slab_profile(n: i32) -> CellAnatomy {
    let sigma = SymmetricTensor::new(0.3, 0.02, 0.0, 0.1, 0.01, 0.1);
    let spacing = Spacing::new(0.25, 0.25, 0.25).unwrap();
    let mut builder = CellAnatomy::builder().spacing(spacing);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                builder = builder.local(Tuple::new(x, y, z), sigma);
            }
        }
    }
    builder.build().unwrap()
}

/// Seeded random tissue in an `n × n × n` box, 70% fill, 10% halo.
pub fn sparse_profile(n: i32, seed: u64) -> CellAnatomy {
    random_tissue(seed, [n, n, n], 0.7, 0.1)
}

/// A smooth voltage field over every cell, local and remote.
pub fn resting_voltages(anatomy: &CellAnatomy) -> Vec<f64> {
    (0..anatomy.size())
        .map(|c| {
            let t = anatomy.global_tuple(c);
            -85.0 + 10.0 * (f64::from(t.x) * 0.3).sin() + f64::from(t.y - t.z)
        })
        .collect()
}

/// Construct a padded host-kernel driver for `anatomy`.
pub fn host_driver(anatomy: &CellAnatomy) -> Result<GridDiffusion, DiffusionError> {
    let config = DiffusionConfig::builder().pad_grid(true).build()?;
    GridDiffusion::with_host_kernel(anatomy, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_build() {
        let slab = slab_profile(4);
        assert_eq!(slab.size(), 64);
        let sparse = sparse_profile(6, 3);
        assert!(sparse.n_local() >= 1);
        assert_eq!(resting_voltages(&sparse).len(), sparse.size());
        assert!(host_driver(&sparse).is_ok());
    }
}
