//! Output accumulation mode for a diffusion pass.

use std::fmt;

use crate::error::ConfigError;

/// How a diffusion pass combines with the caller's derivative array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoopMode {
    /// Zero the local range of the output before computing. Diffusion is
    /// the sole contributor to the derivative this step.
    #[default]
    Reset,
    /// Leave the output untouched and add the diffusion term on top of a
    /// previously computed reaction term.
    Accumulate,
}

impl LoopMode {
    /// Map the integer loop-type code used by simulation drivers.
    ///
    /// `0` is the threaded loop (reset), `1` the parallel-diffusion-reaction
    /// loop (accumulate).
    pub fn from_code(code: i32) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Self::Reset),
            1 => Ok(Self::Accumulate),
            other => Err(ConfigError::InvalidLoopType { code: other }),
        }
    }
}

impl fmt::Display for LoopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "reset"),
            Self::Accumulate => write!(f, "accumulate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_select_modes() {
        assert_eq!(LoopMode::from_code(0).unwrap(), LoopMode::Reset);
        assert_eq!(LoopMode::from_code(1).unwrap(), LoopMode::Accumulate);
        assert_eq!(LoopMode::default(), LoopMode::Reset);
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(
            LoopMode::from_code(7),
            Err(ConfigError::InvalidLoopType { code: 7 })
        );
        assert_eq!(
            ConfigError::InvalidLoopType { code: -2 }.to_string(),
            "unknown loop type code -2, expected 0 or 1"
        );
    }
}
