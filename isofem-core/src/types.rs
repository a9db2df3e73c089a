//! Core data types shared by kernels, Jacobians and the engine.
//!
//! - Geometric primitives (points, gradient vectors)
//! - Reference (parametric) coordinates

use nalgebra::Vector3;

/// A point in 3D physical space.
pub type Point3 = Vector3<f64>;

/// A 3-component vector (gradient, tangent, normal).
pub type Vec3 = Vector3<f64>;

/// A point in reference (parametric) coordinates.
///
/// Only the first `dim` components are meaningful for an element of
/// parametric dimension `dim`; the rest are ignored by the kernels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferenceCoord {
    /// ξ
    pub xi: f64,
    /// η
    pub eta: f64,
    /// ζ
    pub zeta: f64,
}

impl ReferenceCoord {
    /// Create a reference coordinate from all three components.
    pub const fn new(xi: f64, eta: f64, zeta: f64) -> Self {
        Self { xi, eta, zeta }
    }

    /// Reference coordinate on a line element.
    pub const fn line(xi: f64) -> Self {
        Self::new(xi, 0.0, 0.0)
    }

    /// Reference coordinate on a surface element.
    pub const fn plane(xi: f64, eta: f64) -> Self {
        Self::new(xi, eta, 0.0)
    }

    /// Components as an array `[ξ, η, ζ]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.xi, self.eta, self.zeta]
    }
}

impl From<[f64; 3]> for ReferenceCoord {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}
