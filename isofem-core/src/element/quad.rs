//! Quadrilateral kernels (Quad4, Quad8, Quad9) on ξ, η ∈ [-1, 1]².
//!
//! # Node Numbering
//!
//! ```text
//!  3----6----2
//!  |         |
//!  7    8    5
//!  |         |
//!  0----4----1
//! ```
//!
//! - Corner nodes 0..3 counterclockwise from (-1, -1)
//! - Mid-edge nodes 4 (0, -1), 5 (1, 0), 6 (0, 1), 7 (-1, 0) (Quad8, Quad9)
//! - Centroid node 8 (Quad9 only)
//!
//! # Shape Functions
//!
//! Quad4 (bilinear):
//! ```text
//! N_i = (1/4)(1 + ξ_i ξ)(1 + η_i η)
//! ```
//!
//! Quad8 (serendipity), corner nodes:
//! ```text
//! N_i = (1/4)(1 + ξ_i ξ)(1 + η_i η)(ξ_i ξ + η_i η - 1)
//! ```
//! mid-edge nodes with ξ_i = 0: `N_i = (1/2)(1 - ξ²)(1 + η_i η)`,
//! mid-edge nodes with η_i = 0: `N_i = (1/2)(1 + ξ_i ξ)(1 - η²)`.
//!
//! Quad9 is the tensor product of the quadratic 1D Lagrange basis.

use super::line::quadratic;
use crate::types::{ReferenceCoord, Vec3};

/// Reference positions of the Quad4 nodes.
pub const QUAD4_NODES: [[f64; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];

/// Reference positions of the Quad8 nodes.
pub const QUAD8_NODES: [[f64; 3]; 8] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
];

/// Reference positions of the Quad9 nodes.
pub const QUAD9_NODES: [[f64; 3]; 9] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
];

/// Bilinear four-node quadrilateral.
pub(crate) fn quad4(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let (xi, eta) = (p.xi, p.eta);

    for (i, node) in QUAD4_NODES.iter().enumerate() {
        let (xi_i, eta_i) = (node[0], node[1]);
        let a = 1.0 + xi_i * xi;
        let b = 1.0 + eta_i * eta;

        values[i] = 0.25 * a * b;
        grads[i] = Vec3::new(0.25 * xi_i * b, 0.25 * a * eta_i, 0.0);
    }
}

/// Eight-node serendipity quadrilateral.
pub(crate) fn quad8(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let (xi, eta) = (p.xi, p.eta);

    for (i, node) in QUAD8_NODES.iter().enumerate() {
        let (xi_i, eta_i) = (node[0], node[1]);

        if xi_i != 0.0 && eta_i != 0.0 {
            let a = 1.0 + xi_i * xi;
            let b = 1.0 + eta_i * eta;
            let s = xi_i * xi + eta_i * eta - 1.0;

            values[i] = 0.25 * a * b * s;
            // d/dξ [a s] = ξ_i (s + a) = ξ_i (2 ξ_i ξ + η_i η)
            grads[i] = Vec3::new(
                0.25 * xi_i * b * (2.0 * xi_i * xi + eta_i * eta),
                0.25 * eta_i * a * (xi_i * xi + 2.0 * eta_i * eta),
                0.0,
            );
        } else if xi_i == 0.0 {
            let b = 1.0 + eta_i * eta;
            values[i] = 0.5 * (1.0 - xi * xi) * b;
            grads[i] = Vec3::new(-xi * b, 0.5 * (1.0 - xi * xi) * eta_i, 0.0);
        } else {
            let a = 1.0 + xi_i * xi;
            values[i] = 0.5 * a * (1.0 - eta * eta);
            grads[i] = Vec3::new(0.5 * xi_i * (1.0 - eta * eta), -eta * a, 0.0);
        }
    }
}

/// Nine-node biquadratic quadrilateral.
pub(crate) fn quad9(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    for (i, node) in QUAD9_NODES.iter().enumerate() {
        let (lx, dlx) = quadratic(node[0], p.xi);
        let (ly, dly) = quadratic(node[1], p.eta);

        values[i] = lx * ly;
        grads[i] = Vec3::new(dlx * ly, lx * dly, 0.0);
    }
}
