//! Cardiac: anisotropic monodomain diffusion on dense bounding grids.
//!
//! This is the facade crate that re-exports the public API of the
//! `cardiac-*` sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use cardiac::prelude::*;
//!
//! // A 4×4×4 block of tissue with fibres along x.
//! let sigma = SymmetricTensor::diagonal(2.0, 0.5, 0.5);
//! let mut builder = CellAnatomy::builder().spacing(Spacing::new(0.25, 0.25, 0.25).unwrap());
//! for x in 0..4 {
//!     for y in 0..4 {
//!         for z in 0..4 {
//!             builder = builder.local(Tuple::new(x, y, z), sigma);
//!         }
//!     }
//! }
//! let anatomy = builder.build().unwrap();
//!
//! let config = DiffusionConfig::builder().pad_grid(true).build().unwrap();
//! let mut diffusion = GridDiffusion::with_host_kernel(&anatomy, config).unwrap();
//!
//! let vm = vec![-85.0; anatomy.n_local()];
//! let mut dvdt = vec![0.0; anatomy.n_local()];
//! diffusion.update_local_voltage(&vm).unwrap();
//! diffusion.calc(&mut dvdt).unwrap();
//! assert!(dvdt.iter().all(|v| v.abs() < 1e-9));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cardiac-core` | Coordinates, tensors, the anatomy trait, loop modes |
//! | [`residency`] | `cardiac-residency` | Host/device dual-residency buffers |
//! | [`grid`] | `cardiac-grid` | Bounding boxes, grid dimensions, cell↔grid mapping |
//! | [`diffusion`] | `cardiac-diffusion` | Face coefficients, stencil kernels, the driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Leaf types and the anatomy collaborator trait (`cardiac-core`).
pub use cardiac_core as types;

/// Host/device buffers with explicit freshness tracking (`cardiac-residency`).
///
/// [`residency::DualBuffer`] is what every dense array in the driver is
/// stored in.
pub use cardiac_residency as residency;

/// Bounding grids and the cell↔grid index mapper (`cardiac-grid`).
pub use cardiac_grid as grid;

/// Face conductivities, stencil kernels and the diffusion driver
/// (`cardiac-diffusion`).
///
/// Implement [`diffusion::StencilKernel`] to plug in an accelerator
/// backend; [`diffusion::HostStencilKernel`] runs on the host.
pub use cardiac_diffusion as diffusion;

/// Common imports.
///
/// ```rust
/// use cardiac::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use cardiac_core::{
        Anatomy, CellAnatomy, CellClass, LoopMode, Spacing, SymmetricTensor, TissueCell, Tuple,
    };

    // Grid
    pub use cardiac_grid::{BoundingBox, BoundingGrid, GridDims};

    // Diffusion
    pub use cardiac_diffusion::{
        Diffusion, DiffusionConfig, GridDiffusion, HostStencilKernel, StencilArgs, StencilKernel,
    };

    // Errors
    pub use cardiac_core::{AnatomyError, ConfigError};
    pub use cardiac_diffusion::{DiffusionError, KernelError};
    pub use cardiac_grid::GridError;
}
