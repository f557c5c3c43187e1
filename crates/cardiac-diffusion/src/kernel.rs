//! The stencil-kernel contract and the host reference kernel.
//!
//! A [`StencilKernel`] is the boundary to the accelerator. The driver hands
//! it device-resident buffers and the caller's per-cell output array; the
//! kernel computes the anisotropic flux divergence for every local tissue
//! cell and adds it into the output through the lookup table.
//!
//! [`HostStencilKernel`] implements the contract on the host so the whole
//! pipeline runs without an accelerator.

use rayon::prelude::*;

use cardiac_core::Spacing;
use cardiac_grid::{cross_stencil, GridDims};

use crate::error::KernelError;
use crate::face::FaceConductivity;

/// Arguments passed across the kernel boundary for one diffusion pass.
///
/// All grid-sized slices are the device-side copies.
pub struct StencilArgs<'a> {
    /// Scattered voltage field, `nx·ny·nz` values.
    pub voltage: &'a [f64],
    /// Grid-ordered derivative scratch, `nx·ny·nz` values. Fully
    /// overwritten by the kernel; contents on entry are unspecified.
    pub derivative: &'a mut [f64],
    /// Face coefficients, `(nx-1)·(ny-1)·(nz-1)·9` values.
    pub face_conductivity: &'a [f64],
    /// Grid dimensions.
    pub dims: GridDims,
    /// Physical spacing, for normalising by cell volume.
    pub spacing: Spacing,
    /// `lookup[cell] = grid index`, `n_cells` entries.
    pub lookup: &'a [usize],
    /// Number of local cells; results are produced for `[0, n_local)`.
    pub n_local: usize,
    /// Total number of cells.
    pub n_cells: usize,
}

impl StencilArgs<'_> {
    /// Check every length and index precondition of the contract against an
    /// output array of `out_len` entries.
    pub fn validate(&self, out_len: usize) -> Result<(), KernelError> {
        let grid_len = self.dims.len();
        let checks = [
            ("voltage grid", grid_len, self.voltage.len()),
            ("derivative grid", grid_len, self.derivative.len()),
            (
                "face conductivity",
                self.dims.face_positions() * 9,
                self.face_conductivity.len(),
            ),
            ("cell lookup", self.n_cells, self.lookup.len()),
        ];
        for (what, expected, actual) in checks {
            if expected != actual {
                return Err(KernelError::GridLength {
                    what,
                    expected,
                    actual,
                });
            }
        }
        if self.n_local > self.n_cells || out_len < self.n_local || out_len > self.n_cells {
            return Err(KernelError::OutputLength {
                n_local: self.n_local,
                n_cells: self.n_cells,
                actual: out_len,
            });
        }
        if let Some((cell, &index)) = self
            .lookup
            .iter()
            .enumerate()
            .find(|(_, &g)| g >= grid_len)
        {
            return Err(KernelError::LookupOutOfRange {
                cell,
                index,
                grid_len,
            });
        }
        Ok(())
    }
}

/// The accelerator boundary.
///
/// # Contract
///
/// - Compute, for every tissue grid cell, the divergence of the anisotropic
///   flux through its six faces using the precomputed face coefficients.
/// - Gather grid-ordered results back to cell order through `lookup` and
///   **add** them into `out[..n_local]`. Zeroing is the driver's job.
/// - Grid cells absent from the lookup are not tissue and contribute no
///   flux.
/// - Return only when the output is complete; the call is synchronous.
pub trait StencilKernel: Send {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Run one diffusion pass.
    fn apply(&self, args: StencilArgs<'_>, out: &mut [f64]) -> Result<(), KernelError>;
}

/// Pure-host implementation of the [`StencilKernel`] contract.
///
/// Finite-volume scheme: the flux through the face between cell `c` and
/// `c - e_i` is
///
/// ```text
/// F_i(c) = Σ_j coef[i][j] · g_j
/// g_i    = V[c] - V[c - e_i]
/// g_j    = ¼ · (V[c + e_j] - V[c - e_j] + V[c - e_i + e_j] - V[c - e_i - e_j])   (j ≠ i)
/// ```
///
/// and `dV[c] = Σ_i (F_i(c + e_i) - F_i(c)) / volume`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostStencilKernel;

impl HostStencilKernel {
    /// Create the host kernel.
    pub fn new() -> Self {
        Self
    }

    /// Flux along `+e_normal` through the lower face of `upper`.
    fn face_flux(
        dims: &GridDims,
        voltage: &[f64],
        faces: &[f64],
        upper: usize,
        normal: usize,
    ) -> f64 {
        let Some(pos) = FaceConductivity::slot(dims, upper) else {
            return 0.0;
        };
        let Some(lower) = dims.step(upper, normal, -1) else {
            return 0.0;
        };
        let mut flux = 0.0;
        for tangent in 0..3 {
            let coef = faces[FaceConductivity::offset(pos, normal, tangent)];
            if coef == 0.0 {
                continue;
            }
            let gradient = if tangent == normal {
                voltage[upper] - voltage[lower]
            } else {
                let s = cross_stencil(dims, upper, normal, tangent);
                if s.len() != 4 {
                    continue;
                }
                0.25 * ((voltage[s[1]] - voltage[s[0]]) + (voltage[s[3]] - voltage[s[2]]))
            };
            flux += coef * gradient;
        }
        flux
    }
}

impl StencilKernel for HostStencilKernel {
    fn name(&self) -> &str {
        "host"
    }

    fn apply(&self, args: StencilArgs<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        args.validate(out.len())?;
        let StencilArgs {
            voltage,
            derivative,
            face_conductivity: faces,
            dims,
            spacing,
            lookup,
            n_local,
            ..
        } = args;
        let inv_volume = 1.0 / spacing.cell_volume();

        derivative.par_iter_mut().enumerate().for_each(|(g, dv)| {
            let mut div = 0.0;
            for axis in 0..3 {
                if let Some(next) = dims.step(g, axis, 1) {
                    div += Self::face_flux(&dims, voltage, faces, next, axis);
                }
                div -= Self::face_flux(&dims, voltage, faces, g, axis);
            }
            *dv = div * inv_volume;
        });

        let derivative: &[f64] = derivative;
        out[..n_local]
            .par_iter_mut()
            .zip(lookup[..n_local].par_iter())
            .for_each(|(o, &g)| *o += derivative[g]);
        Ok(())
    }
}
