//! Cell ↔ grid index mapping.
//!
//! [`map_cells`] walks the anatomy once, computes each cell's linear grid
//! index and records both directions:
//!
//! - [`CellLookup`]: `lookup[cell] = grid index`, persisted for the hot path.
//! - [`BlockIndex`]: `grid index → cell`, used only while precomputing face
//!   coefficients and dropped afterwards.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use cardiac_core::Anatomy;

use crate::bounds::BoundingGrid;
use crate::error::GridError;

/// Per-cell grid index table, in anatomy cell order.
///
/// Injective by construction: no two cells share a grid index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellLookup {
    indices: Vec<usize>,
    n_local: usize,
}

impl CellLookup {
    /// All grid indices, local cells first.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Grid indices of local cells.
    pub fn local(&self) -> &[usize] {
        &self.indices[..self.n_local]
    }

    /// Grid indices of remote (halo) cells.
    pub fn remote(&self) -> &[usize] {
        &self.indices[self.n_local..]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of local cells.
    pub fn n_local(&self) -> usize {
        self.n_local
    }

    /// Take the underlying vector.
    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Reverse map from grid index to tissue cell.
///
/// Answers "is grid index `g` tissue, and which cell is it". Scoped to
/// construction; the diffusion core never stores it.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex {
    cells: IndexMap<usize, usize>,
}

impl BlockIndex {
    /// The cell at grid index `g`, if `g` is tissue.
    pub fn cell_at(&self, g: usize) -> Option<usize> {
        self.cells.get(&g).copied()
    }

    /// Whether grid index `g` is tissue.
    pub fn is_tissue(&self, g: usize) -> bool {
        self.cells.contains_key(&g)
    }

    /// Number of tissue grid cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no grid cell is tissue.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Output of [`map_cells`].
#[derive(Clone, Debug)]
pub struct CellMap {
    /// Forward table, persisted.
    pub lookup: CellLookup,
    /// Reverse table, construction-scoped.
    pub blocks: BlockIndex,
}

/// Map every anatomy cell onto `grid`.
///
/// Fails with [`GridError::CoordinateOverflow`] if a cell's offset from the
/// grid origin does not fit an `i32`, with [`GridError::CellOutsideGrid`] if
/// a cell's local coordinate is outside the grid and with [`GridError::IndexCollision`] if two cells
/// share a grid index. The collision check covers local/local,
/// remote/remote and local/remote overlaps alike.
pub fn map_cells<A: Anatomy + ?Sized>(
    anatomy: &A,
    grid: &BoundingGrid,
) -> Result<CellMap, GridError> {
    let dims = grid.dims();
    let n_cells = anatomy.size();
    let mut indices = Vec::with_capacity(n_cells);
    let mut cells = IndexMap::with_capacity(n_cells);

    for cell in 0..n_cells {
        let global = anatomy.global_tuple(cell);
        let local = grid
            .local_tuple(global)
            .ok_or(GridError::CoordinateOverflow {
                cell,
                global,
                origin: grid.origin(),
            })?;
        let g = dims.index(local).ok_or_else(|| GridError::CellOutsideGrid {
            cell,
            local,
            dims: dims.to_string(),
        })?;
        match cells.entry(g) {
            Entry::Occupied(e) => {
                let first = *e.get();
                return Err(GridError::IndexCollision {
                    grid_index: g,
                    local,
                    first,
                    first_class: anatomy.class(first),
                    second: cell,
                    second_class: anatomy.class(cell),
                });
            }
            Entry::Vacant(e) => {
                e.insert(cell);
            }
        }
        indices.push(g);
    }

    debug!(
        cells = n_cells,
        local = anatomy.n_local(),
        grid = %dims,
        fill = n_cells as f64 / dims.len() as f64,
        "mapped tissue cells onto grid"
    );

    Ok(CellMap {
        lookup: CellLookup {
            indices,
            n_local: anatomy.n_local(),
        },
        blocks: BlockIndex { cells },
    })
}
