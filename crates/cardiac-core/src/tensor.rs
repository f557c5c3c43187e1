//! Symmetric 3×3 conductivity tensor.

/// A symmetric 3×3 tensor stored by its six independent entries.
///
/// Cardiac conductivity is symmetric positive semi-definite; only the upper
/// triangle is stored. [`to_matrix`](Self::to_matrix) expands it to a dense
/// row-major matrix for per-axis row access.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SymmetricTensor {
    /// Entry (0, 0).
    pub a11: f64,
    /// Entries (0, 1) and (1, 0).
    pub a12: f64,
    /// Entries (0, 2) and (2, 0).
    pub a13: f64,
    /// Entry (1, 1).
    pub a22: f64,
    /// Entries (1, 2) and (2, 1).
    pub a23: f64,
    /// Entry (2, 2).
    pub a33: f64,
}

impl SymmetricTensor {
    /// Build a tensor from its upper-triangle entries.
    pub const fn new(a11: f64, a12: f64, a13: f64, a22: f64, a23: f64, a33: f64) -> Self {
        Self {
            a11,
            a12,
            a13,
            a22,
            a23,
            a33,
        }
    }

    /// A diagonal tensor (no cross-axis coupling).
    pub const fn diagonal(a11: f64, a22: f64, a33: f64) -> Self {
        Self::new(a11, 0.0, 0.0, a22, 0.0, a33)
    }

    /// The isotropic tensor `value · I`.
    pub const fn isotropic(value: f64) -> Self {
        Self::diagonal(value, value, value)
    }

    /// Dense row-major expansion.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.a11, self.a12, self.a13],
            [self.a12, self.a22, self.a23],
            [self.a13, self.a23, self.a33],
        ]
    }

    /// Whether all six entries are finite.
    pub fn is_finite(&self) -> bool {
        [self.a11, self.a12, self.a13, self.a22, self.a23, self.a33]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_is_symmetric() {
        let t = SymmetricTensor::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m = t.to_matrix();
        for (i, row) in m.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_eq!(v, m[j][i]);
            }
        }
        assert_eq!(m[0], [1.0, 2.0, 3.0]);
        assert_eq!(m[2][2], 6.0);
    }

    #[test]
    fn isotropic_has_zero_off_diagonal() {
        let m = SymmetricTensor::isotropic(0.5).to_matrix();
        assert_eq!(m, [[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]]);
    }

    #[test]
    fn nan_entry_is_not_finite() {
        let t = SymmetricTensor::new(1.0, f64::NAN, 0.0, 1.0, 0.0, 1.0);
        assert!(!t.is_finite());
        assert!(SymmetricTensor::isotropic(1.0).is_finite());
    }
}
