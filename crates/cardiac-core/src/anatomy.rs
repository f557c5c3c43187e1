//! The [`Anatomy`] collaborator trait and an owned implementation.
//!
//! An anatomy is the read-only source of tissue cells for one partition of
//! a domain-decomposed simulation. Cells are indexed compactly: local cells
//! (owned by this partition) occupy `[0, n_local)`, remote (halo) cells
//! received from neighbouring partitions occupy `[n_local, size)`.

use crate::error::AnatomyError;
use crate::tensor::SymmetricTensor;
use crate::tuple::{Spacing, Tuple};

/// Ownership class of a tissue cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Owned and updated by this partition.
    Local,
    /// Owned by a neighbouring partition; voltage is received read-only.
    Remote,
}

/// One tissue cell as delivered by the anatomy source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TissueCell {
    /// Global lattice coordinate.
    pub global: Tuple,
    /// Conductivity tensor at this cell.
    pub conductivity: SymmetricTensor,
}

/// Read-only tissue description consumed by the diffusion core.
///
/// Topology is fixed for the lifetime of any diffusion instance built
/// from it; implementations must return the same values on every call.
pub trait Anatomy {
    /// Total number of cells (local + remote).
    fn size(&self) -> usize;

    /// Number of local cells. Local cells are indices `[0, n_local)`.
    fn n_local(&self) -> usize;

    /// Number of remote (halo) cells.
    fn n_remote(&self) -> usize {
        self.size().saturating_sub(self.n_local())
    }

    /// Global lattice coordinate of `cell`.
    fn global_tuple(&self, cell: usize) -> Tuple;

    /// Conductivity tensor of `cell`.
    fn conductivity(&self, cell: usize) -> SymmetricTensor;

    /// Physical spacing of the lattice.
    fn spacing(&self) -> Spacing;

    /// Ownership class of `cell`, derived from its index range.
    fn class(&self, cell: usize) -> CellClass {
        if cell < self.n_local() {
            CellClass::Local
        } else {
            CellClass::Remote
        }
    }
}

/// An owned, validated anatomy backed by a `Vec<TissueCell>`.
///
/// Constructed via [`CellAnatomy::builder`], which guarantees that local
/// cells precede remote cells regardless of insertion order.
#[derive(Clone, Debug)]
pub struct CellAnatomy {
    cells: Vec<TissueCell>,
    n_local: usize,
    spacing: Spacing,
}

impl CellAnatomy {
    /// Build directly from an ordered cell list.
    ///
    /// `cells[..n_local]` are local, the rest are remote.
    pub fn new(
        cells: Vec<TissueCell>,
        n_local: usize,
        spacing: Spacing,
    ) -> Result<Self, AnatomyError> {
        if cells.is_empty() {
            return Err(AnatomyError::EmptyAnatomy);
        }
        if n_local > cells.len() {
            return Err(AnatomyError::LocalCountExceedsTotal {
                n_local,
                n_cells: cells.len(),
            });
        }
        if let Some(cell) = cells.iter().position(|c| !c.conductivity.is_finite()) {
            return Err(AnatomyError::InvalidConductivity { cell });
        }
        Ok(Self {
            cells,
            n_local,
            spacing,
        })
    }

    /// Start building an anatomy.
    pub fn builder() -> CellAnatomyBuilder {
        CellAnatomyBuilder {
            local: Vec::new(),
            remote: Vec::new(),
            spacing: Spacing::unit(),
        }
    }

    /// Look up a cell, failing if the index is out of range.
    pub fn cell(&self, index: usize) -> Result<&TissueCell, AnatomyError> {
        self.cells
            .get(index)
            .ok_or(AnatomyError::CellIndexOutOfRange {
                index,
                n_cells: self.cells.len(),
            })
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[TissueCell] {
        &self.cells
    }
}

impl Anatomy for CellAnatomy {
    fn size(&self) -> usize {
        self.cells.len()
    }

    fn n_local(&self) -> usize {
        self.n_local
    }

    fn global_tuple(&self, cell: usize) -> Tuple {
        self.cells[cell].global
    }

    fn conductivity(&self, cell: usize) -> SymmetricTensor {
        self.cells[cell].conductivity
    }

    fn spacing(&self) -> Spacing {
        self.spacing
    }
}

/// Builder for [`CellAnatomy`].
///
/// Local and remote cells may be added in any interleaving; `build()`
/// places all local cells first, each class in insertion order.
pub struct CellAnatomyBuilder {
    local: Vec<TissueCell>,
    remote: Vec<TissueCell>,
    spacing: Spacing,
}

impl CellAnatomyBuilder {
    /// Set the lattice spacing. Default: unit spacing.
    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Add a local cell.
    pub fn local(mut self, global: Tuple, conductivity: SymmetricTensor) -> Self {
        self.local.push(TissueCell {
            global,
            conductivity,
        });
        self
    }

    /// Add a remote (halo) cell.
    pub fn remote(mut self, global: Tuple, conductivity: SymmetricTensor) -> Self {
        self.remote.push(TissueCell {
            global,
            conductivity,
        });
        self
    }

    /// Add a cell of the given class.
    pub fn cell(self, class: CellClass, global: Tuple, conductivity: SymmetricTensor) -> Self {
        match class {
            CellClass::Local => self.local(global, conductivity),
            CellClass::Remote => self.remote(global, conductivity),
        }
    }

    /// Validate and build.
    pub fn build(self) -> Result<CellAnatomy, AnatomyError> {
        let n_local = self.local.len();
        let mut cells = self.local;
        cells.extend(self.remote);
        CellAnatomy::new(cells, n_local, self.spacing)
    }
}
