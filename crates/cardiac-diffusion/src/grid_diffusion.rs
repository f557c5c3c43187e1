//! The diffusion driver.
//!
//! [`GridDiffusion`] owns the four dense buffers of one partition (voltage
//! grid, derivative grid, face coefficients, cell lookup) and the stencil
//! kernel that consumes them. Construction maps the anatomy onto its
//! bounding grid and precomputes face coefficients once; every timestep
//! then scatters voltages and runs [`calc`](Diffusion::calc).

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info};

use cardiac_core::{Anatomy, AnatomyError, LoopMode};
use cardiac_grid::{map_cells, BoundingGrid, GridDims};
use cardiac_residency::{DualBuffer, MemorySide, TransferStats};

use crate::config::DiffusionConfig;
use crate::diffusion::Diffusion;
use crate::error::DiffusionError;
use crate::face::FaceConductivity;
use crate::kernel::{HostStencilKernel, StencilArgs, StencilKernel};
use crate::scatter::scatter;

/// Per-buffer host↔device transfer counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResidencyReport {
    /// Voltage grid transfers.
    pub voltage: TransferStats,
    /// Derivative grid transfers.
    pub derivative: TransferStats,
    /// Face coefficient transfers.
    pub face_conductivity: TransferStats,
    /// Cell lookup transfers.
    pub lookup: TransferStats,
}

impl ResidencyReport {
    /// Transfers across all four buffers.
    pub fn total(&self) -> u64 {
        self.voltage.total()
            + self.derivative.total()
            + self.face_conductivity.total()
            + self.lookup.total()
    }
}

/// Monodomain diffusion on a dense bounding grid.
///
/// # Examples
///
/// ```
/// use cardiac_core::{CellAnatomy, SymmetricTensor, Tuple};
/// use cardiac_diffusion::{Diffusion, DiffusionConfig, GridDiffusion};
///
/// let sigma = SymmetricTensor::isotropic(1.0);
/// let anatomy = CellAnatomy::builder()
///     .local(Tuple::new(0, 0, 0), sigma)
///     .local(Tuple::new(1, 0, 0), sigma)
///     .build()
///     .unwrap();
/// let config = DiffusionConfig::builder().pad_grid(true).build().unwrap();
/// let mut diffusion = GridDiffusion::with_host_kernel(&anatomy, config).unwrap();
///
/// diffusion.update_local_voltage(&[1.0, 3.0]).unwrap();
/// let mut dv = vec![0.0; 2];
/// diffusion.calc(&mut dv).unwrap();
/// assert_eq!(dv, vec![2.0, -2.0]);
/// ```
pub struct GridDiffusion {
    config: DiffusionConfig,
    grid: BoundingGrid,
    n_local: usize,
    n_cells: usize,
    voltage: DualBuffer<f64>,
    derivative: DualBuffer<f64>,
    face_conductivity: DualBuffer<f64>,
    lookup: DualBuffer<usize>,
    kernel: Box<dyn StencilKernel>,
}

impl GridDiffusion {
    /// Build over the anatomy's bounding box (padded per `config`).
    pub fn new<A: Anatomy + ?Sized>(
        anatomy: &A,
        config: DiffusionConfig,
        kernel: Box<dyn StencilKernel>,
    ) -> Result<Self, DiffusionError> {
        validate_counts(anatomy)?;
        let grid = BoundingGrid::from_anatomy(anatomy, config.padding())?;
        Self::with_grid(anatomy, grid, config, kernel)
    }

    /// Build over the anatomy's bounding box with the host reference kernel.
    pub fn with_host_kernel<A: Anatomy + ?Sized>(
        anatomy: &A,
        config: DiffusionConfig,
    ) -> Result<Self, DiffusionError> {
        Self::new(anatomy, config, Box::new(HostStencilKernel::new()))
    }

    /// Build over a caller-supplied bounding grid.
    ///
    /// `config.pad_grid` is ignored; the grid is used as given. Every cell's
    /// local coordinate must fall inside it.
    pub fn with_grid<A: Anatomy + ?Sized>(
        anatomy: &A,
        grid: BoundingGrid,
        config: DiffusionConfig,
        kernel: Box<dyn StencilKernel>,
    ) -> Result<Self, DiffusionError> {
        validate_counts(anatomy)?;
        let map = map_cells(anatomy, &grid)?;
        let faces = FaceConductivity::precompute(anatomy, &grid, &map.blocks);
        let dims = grid.dims();
        let n_cells = anatomy.size();
        let n_local = anatomy.n_local();

        info!(
            grid = %dims,
            cells = n_cells,
            local = n_local,
            remote = n_cells - n_local,
            fill = n_cells as f64 / dims.len() as f64,
            loop_mode = %config.loop_mode,
            kernel = kernel.name(),
            "diffusion constructed"
        );

        Ok(Self {
            config,
            grid,
            n_local,
            n_cells,
            voltage: DualBuffer::zeroed("voltage", dims.len()),
            derivative: DualBuffer::zeroed("derivative", dims.len()),
            face_conductivity: DualBuffer::from_host("face_conductivity", faces.into_vec()),
            lookup: DualBuffer::from_host("lookup", map.lookup.into_vec()),
            kernel,
        })
    }

    /// The bounding grid.
    pub fn grid(&self) -> &BoundingGrid {
        &self.grid
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.grid.dims()
    }

    /// Number of local cells.
    pub fn n_local(&self) -> usize {
        self.n_local
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// The configuration fixed at construction.
    pub fn config(&self) -> DiffusionConfig {
        self.config
    }

    /// `lookup[cell] = grid index`, host view.
    pub fn lookup(&mut self) -> &[usize] {
        self.lookup.read_on_host()
    }

    /// Face coefficients in `9·pos + 3·i + j` layout, host view.
    pub fn face_conductivity(&mut self) -> &[f64] {
        self.face_conductivity.read_on_host()
    }

    /// The scattered voltage grid, host view.
    ///
    /// Values at non-tissue grid cells are meaningless.
    pub fn voltage_grid(&mut self) -> &[f64] {
        self.voltage.read_on_host()
    }

    /// Transfer counts for every owned buffer.
    pub fn residency(&self) -> ResidencyReport {
        ResidencyReport {
            voltage: self.voltage.stats(),
            derivative: self.derivative.stats(),
            face_conductivity: self.face_conductivity.stats(),
            lookup: self.lookup.stats(),
        }
    }

    fn scatter_range(
        &mut self,
        what: &'static str,
        start: usize,
        end: usize,
        values: &[f64],
    ) -> Result<(), DiffusionError> {
        let expected = end - start;
        if values.len() != expected {
            return Err(DiffusionError::LengthMismatch {
                what,
                expected,
                actual: values.len(),
            });
        }
        if expected == 0 {
            return Ok(());
        }
        let lookup = self.lookup.read_on_device();
        let grid = self.voltage.modify_on_device();
        scatter(grid, &lookup[start..end], values);
        Ok(())
    }
}

impl Diffusion for GridDiffusion {
    fn update_local_voltage(&mut self, voltage: &[f64]) -> Result<(), DiffusionError> {
        self.scatter_range("local voltage", 0, self.n_local, voltage)
    }

    fn update_remote_voltage(&mut self, voltage: &[f64]) -> Result<(), DiffusionError> {
        self.scatter_range("remote voltage", self.n_local, self.n_cells, voltage)
    }

    fn calc(&mut self, out: &mut [f64]) -> Result<(), DiffusionError> {
        if out.len() < self.n_local || out.len() > self.n_cells {
            return Err(DiffusionError::OutputLength {
                n_local: self.n_local,
                n_cells: self.n_cells,
                actual: out.len(),
            });
        }
        let args = StencilArgs {
            voltage: self.voltage.read_on(MemorySide::Device),
            derivative: self.derivative.overwrite_on(MemorySide::Device),
            face_conductivity: self.face_conductivity.read_on(MemorySide::Device),
            dims: self.grid.dims(),
            spacing: self.grid.spacing(),
            lookup: self.lookup.read_on(MemorySide::Device),
            n_local: self.n_local,
            n_cells: self.n_cells,
        };
        args.validate(out.len())?;
        if self.config.loop_mode == LoopMode::Reset {
            out[..self.n_local].par_iter_mut().for_each(|v| *v = 0.0);
        }
        self.kernel.apply(args, out)?;

        debug!(
            kernel = self.kernel.name(),
            loop_mode = %self.config.loop_mode,
            local = self.n_local,
            "diffusion calc complete"
        );
        Ok(())
    }
}

impl fmt::Debug for GridDiffusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridDiffusion")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("n_local", &self.n_local)
            .field("n_cells", &self.n_cells)
            .field("kernel", &self.kernel.name())
            .finish_non_exhaustive()
    }
}

fn validate_counts<A: Anatomy + ?Sized>(anatomy: &A) -> Result<(), AnatomyError> {
    if anatomy.size() == 0 {
        return Err(AnatomyError::EmptyAnatomy);
    }
    if anatomy.n_local() > anatomy.size() {
        return Err(AnatomyError::LocalCountExceedsTotal {
            n_local: anatomy.n_local(),
            n_cells: anatomy.size(),
        });
    }
    Ok(())
}
