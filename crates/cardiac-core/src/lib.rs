//! Core types and traits for the cardiac tissue diffusion workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the grid mapper, the residency layer and the
//! diffusion driver: integer lattice coordinates, axis spacings, the
//! symmetric conductivity tensor, the [`Anatomy`] collaborator trait, the
//! accumulation [`LoopMode`], and the anatomy and configuration error
//! types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anatomy;
pub mod error;
pub mod mode;
pub mod tensor;
pub mod tuple;

pub use anatomy::{Anatomy, CellAnatomy, CellAnatomyBuilder, CellClass, TissueCell};
pub use error::{AnatomyError, ConfigError};
pub use mode::LoopMode;
pub use tensor::SymmetricTensor;
pub use tuple::{Spacing, Tuple};
