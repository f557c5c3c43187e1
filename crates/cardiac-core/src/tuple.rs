//! Integer lattice coordinates and physical axis spacing.

use std::fmt;

use crate::error::AnatomyError;

/// A 3D integer coordinate on the tissue lattice.
///
/// Used both for global coordinates (as delivered by the anatomy source)
/// and for local coordinates relative to a bounding box origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple {
    /// Coordinate along the first axis.
    pub x: i32,
    /// Coordinate along the second axis.
    pub y: i32,
    /// Coordinate along the third axis.
    pub z: i32,
}

impl Tuple {
    /// Create a coordinate from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Component-wise `self - other`, or `None` if any component overflows.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.x.checked_sub(other.x)?,
            self.y.checked_sub(other.y)?,
            self.z.checked_sub(other.z)?,
        ))
    }

    /// Components widened to `i64`, in axis order.
    pub fn widen(self) -> [i64; 3] {
        [self.x.into(), self.y.into(), self.z.into()]
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Physical grid spacing along each axis.
///
/// Every value is finite and strictly positive. Values come only from
/// [`Spacing::new`] or [`Spacing::unit`]:
///
/// ```compile_fail
/// let s = cardiac_core::Spacing { dx: 0.0, dy: 1.0, dz: 1.0 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Spacing {
    /// Create a spacing, rejecting non-finite or non-positive values.
    pub fn new(dx: f64, dy: f64, dz: f64) -> Result<Self, AnatomyError> {
        for (axis, value) in [("dx", dx), ("dy", dy), ("dz", dz)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnatomyError::InvalidSpacing { axis, value });
            }
        }
        Ok(Self { dx, dy, dz })
    }

    /// Unit spacing on all three axes.
    pub const fn unit() -> Self {
        Self {
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
        }
    }

    /// Spacings in axis order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Area of the face normal to each axis (product of the other two spacings).
    pub fn face_areas(&self) -> [f64; 3] {
        [self.dy * self.dz, self.dx * self.dz, self.dx * self.dy]
    }

    /// Volume of one grid cell.
    pub fn cell_volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_are_componentwise() {
        let a = Tuple::new(1, 5, -2);
        let b = Tuple::new(3, 0, -1);
        assert_eq!(a.min(b), Tuple::new(1, 0, -2));
        assert_eq!(a.max(b), Tuple::new(3, 5, -1));
    }

    #[test]
    fn checked_sub_gives_local_offset() {
        let global = Tuple::new(10, 11, 12);
        let origin = Tuple::new(9, 9, 9);
        assert_eq!(global.checked_sub(origin), Some(Tuple::new(1, 2, 3)));
    }

    #[test]
    fn checked_sub_reports_overflow() {
        let far = Tuple::new(i32::MAX, 0, 0);
        let near = Tuple::new(i32::MIN, 0, 0);
        assert_eq!(far.checked_sub(near), None);
        assert_eq!(
            near.checked_sub(Tuple::new(0, 0, 1)),
            Some(Tuple::new(i32::MIN, 0, -1))
        );
        assert_eq!(near.widen(), [i64::from(i32::MIN), 0, 0]);
    }

    #[test]
    fn face_areas_use_other_two_axes() {
        let s = Spacing::new(0.1, 0.2, 0.5).unwrap();
        let areas = s.face_areas();
        assert!((areas[0] - 0.1).abs() < 1e-12);
        assert!((areas[1] - 0.05).abs() < 1e-12);
        assert!((areas[2] - 0.02).abs() < 1e-12);
        assert!((s.cell_volume() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn spacing_rejects_zero_and_nan() {
        assert!(matches!(
            Spacing::new(0.0, 1.0, 1.0),
            Err(AnatomyError::InvalidSpacing { axis: "dx", .. })
        ));
        assert!(matches!(
            Spacing::new(1.0, f64::NAN, 1.0),
            Err(AnatomyError::InvalidSpacing { axis: "dy", .. })
        ));
        assert!(Spacing::new(1.0, 1.0, -0.5).is_err());
        assert!(Spacing::new(1.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn every_spacing_has_positive_volume() {
        let built = Spacing::new(1e-3, 2.0, 0.5).unwrap();
        for s in [Spacing::unit(), Spacing::default(), built] {
            assert!(s.as_array().iter().all(|v| v.is_finite() && *v > 0.0));
            assert!(s.cell_volume() > 0.0);
        }
    }
}
