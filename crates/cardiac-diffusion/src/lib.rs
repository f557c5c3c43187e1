//! Anisotropic monodomain diffusion on dense bounding grids.
//!
//! Computes the conduction term `dVm/dt` of a cardiac tissue simulation for
//! one partition of a domain-decomposed anatomy. The irregular cell ordering
//! is embedded into a dense grid, face conductivities are precomputed once,
//! and each timestep scatters voltages into the grid and hands device-resident
//! buffers to a [`StencilKernel`].
//!
//! # Per-timestep protocol
//!
//! 1. [`Diffusion::update_local_voltage`]: scatter owned voltages.
//! 2. [`Diffusion::update_remote_voltage`]: scatter halo voltages.
//! 3. [`Diffusion::calc`]: reset or keep the output per [`LoopMode`],
//!    make every buffer device-resident, run the kernel.
//!
//! [`LoopMode`]: cardiac_core::LoopMode

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod diffusion;
pub mod error;
pub mod face;
pub mod grid_diffusion;
pub mod kernel;
mod scatter;

pub use config::{DiffusionConfig, DiffusionConfigBuilder};
pub use diffusion::Diffusion;
pub use error::{DiffusionError, KernelError};
pub use face::FaceConductivity;
pub use grid_diffusion::{GridDiffusion, ResidencyReport};
pub use kernel::{HostStencilKernel, StencilArgs, StencilKernel};
