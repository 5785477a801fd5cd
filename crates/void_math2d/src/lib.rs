//! # void_math2d - 2D Math for Rigid Body Simulation
//!
//! Double-precision vector and transform primitives used by the
//! `void_physics2d` core. Everything here is a plain `Copy` value type.

pub mod transform;
pub mod vector;

pub use transform::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f64 = core::f64::consts::PI;
    pub const TAU: f64 = PI * 2.0;
    pub const DEG_TO_RAD: f64 = PI / 180.0;
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
    pub const EPSILON: f64 = 1e-9;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f64) -> f64 {
    radians * consts::RAD_TO_DEG
}

/// Absolute-tolerance comparison
#[inline]
pub fn almost_eq(a: f64, b: f64, margin: f64) -> bool {
    (a - b).abs() < margin
}

pub mod prelude {
    pub use crate::transform::Transform2D;
    pub use crate::vector::Vec2;
    pub use crate::{almost_eq, degrees, radians};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(radians(180.0), consts::PI);
        assert_relative_eq!(degrees(consts::PI / 2.0), 90.0);
    }

    #[test]
    fn test_almost_eq_is_absolute() {
        assert!(almost_eq(1.0, 1.004, 5e-3));
        assert!(!almost_eq(1.0, 1.006, 5e-3));
        assert!(!almost_eq(f64::INFINITY, 1.0, 5e-3));
    }
}
