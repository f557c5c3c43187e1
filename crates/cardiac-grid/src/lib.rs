//! Dense bounding grids for sparse cardiac tissue.
//!
//! Tissue cells arrive in a compact, domain-decomposed ordering. Stencil
//! kernels want a dense structured grid. This crate provides the bridge:
//!
//! - [`BoundingBox`] / [`BoundingGrid`]: the smallest axis-aligned box
//!   containing every cell, and the global→local coordinate transform.
//! - [`GridDims`]: linear indexing `z + nz·(y + ny·x)` with
//!   coordinate-aware neighbour stepping.
//! - [`map_cells`]: the index mapper producing a [`CellLookup`]
//!   (`cell → grid index`) and the construction-scoped [`BlockIndex`]
//!   (`grid index → cell`).
//! - [`cross_stencil`]: the four tangential neighbours needed to estimate a
//!   transverse gradient on a face.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod dims;
pub mod error;
pub mod mapper;
pub mod stencil;

pub use bounds::{BoundingBox, BoundingGrid};
pub use dims::GridDims;
pub use error::GridError;
pub use mapper::{map_cells, BlockIndex, CellLookup, CellMap};
pub use stencil::cross_stencil;
