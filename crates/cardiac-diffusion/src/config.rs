//! Diffusion configuration.

use cardiac_core::{ConfigError, LoopMode};

/// Configuration for a [`GridDiffusion`](crate::GridDiffusion) instance.
///
/// Fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffusionConfig {
    /// Whether `calc` zeroes the local output range first or adds on top
    /// of it. Default: [`LoopMode::Reset`].
    pub loop_mode: LoopMode,

    /// Grow the bounding grid by one empty cell on every side.
    ///
    /// Face coefficients are stored at the upper cell of each face, offset
    /// by one on every axis. Without padding, faces of tissue on the grid's
    /// low layers (local x, y or z equal to zero) have no slot and carry no
    /// flux. Padding gives every tissue face a slot. Default: `false`.
    pub pad_grid: bool,
}

impl DiffusionConfig {
    /// Start building a config.
    pub fn builder() -> DiffusionConfigBuilder {
        DiffusionConfigBuilder {
            loop_mode: LoopMode::default(),
            loop_code: None,
            pad_grid: false,
        }
    }

    /// Number of empty cells added on each side of the bounding box.
    pub fn padding(&self) -> u32 {
        u32::from(self.pad_grid)
    }
}

/// Builder for [`DiffusionConfig`].
///
/// The loop mode may be given as a [`LoopMode`] or as the driver's integer
/// loop-type code; the code, if set, wins and is validated by `build()`.
pub struct DiffusionConfigBuilder {
    loop_mode: LoopMode,
    loop_code: Option<i32>,
    pad_grid: bool,
}

impl DiffusionConfigBuilder {
    /// Set the accumulation mode.
    pub fn loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Set the accumulation mode from an integer loop-type code.
    pub fn loop_type_code(mut self, code: i32) -> Self {
        self.loop_code = Some(code);
        self
    }

    /// Enable or disable bounding-grid padding.
    pub fn pad_grid(mut self, pad: bool) -> Self {
        self.pad_grid = pad;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<DiffusionConfig, ConfigError> {
        let loop_mode = match self.loop_code {
            Some(code) => LoopMode::from_code(code)?,
            None => self.loop_mode,
        };
        Ok(DiffusionConfig {
            loop_mode,
            pad_grid: self.pad_grid,
        })
    }
}
