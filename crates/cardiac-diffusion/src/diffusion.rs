//! The per-timestep diffusion interface.

use crate::error::DiffusionError;

/// A conduction operator driven once per timestep by the outer solver.
///
/// Call order each step: [`update_local_voltage`](Self::update_local_voltage),
/// [`update_remote_voltage`](Self::update_remote_voltage) once the halo
/// exchange has completed, then [`calc`](Self::calc). Remote voltages left
/// over from a previous step are used as-is if the second call is skipped.
pub trait Diffusion {
    /// Scatter the owned cells' voltages. `voltage.len()` must equal the
    /// number of local cells.
    fn update_local_voltage(&mut self, voltage: &[f64]) -> Result<(), DiffusionError>;

    /// Scatter halo voltages. `voltage[k]` belongs to cell `n_local + k`;
    /// `voltage.len()` must equal the number of remote cells.
    fn update_remote_voltage(&mut self, voltage: &[f64]) -> Result<(), DiffusionError>;

    /// Compute `dVm/dt` into `out[..n_local]`. `out` may be longer than the
    /// local range but not longer than the cell count; entries past
    /// `n_local` are left untouched. If an argument is rejected, `out` is
    /// not modified.
    fn calc(&mut self, out: &mut [f64]) -> Result<(), DiffusionError>;
}
