//! Anatomy fixtures for cardiac diffusion development.
//!
//! Deterministic tissue shapes for unit, property and integration tests:
//! solid blocks, blocks with holes, blocks split into local and remote
//! partitions, and seeded random tissue.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    block_with_holes, random_conductivity, random_tissue, solid_block, split_block, uniform_rng,
};
