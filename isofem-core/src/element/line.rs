//! 1D Lagrange kernels on ξ ∈ [-1, 1] (Line2, Line3, Line4).
//!
//! # Node Numbering
//!
//! ```text
//! Line2:  0-----------1
//! Line3:  0-----1-----2
//! Line4:  0---1---2---3
//! ```
//!
//! Nodes are numbered left to right along ξ for every order:
//!
//! - Line2: ξ = -1, 1
//! - Line3: ξ = -1, 0, 1
//! - Line4: ξ = -1, -1/3, 1/3, 1

use crate::types::{ReferenceCoord, Vec3};

/// Reference positions of the Line2 nodes.
pub const LINE2_NODES: [[f64; 3]; 2] = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];

/// Reference positions of the Line3 nodes.
pub const LINE3_NODES: [[f64; 3]; 3] = [[-1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];

/// Reference positions of the Line4 nodes.
pub const LINE4_NODES: [[f64; 3]; 4] = [
    [-1.0, 0.0, 0.0],
    [-1.0 / 3.0, 0.0, 0.0],
    [1.0 / 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
];

/// Quadratic 1D Lagrange polynomial attached to `node` ∈ {-1, 0, 1}.
///
/// Returns `(l(x), dl/dx)`. Shared by the tensor-product Quad9 and Hex27
/// kernels.
#[inline]
pub(crate) fn quadratic(node: f64, x: f64) -> (f64, f64) {
    if node < 0.0 {
        (0.5 * x * (x - 1.0), x - 0.5)
    } else if node > 0.0 {
        (0.5 * x * (x + 1.0), x + 0.5)
    } else {
        (1.0 - x * x, -2.0 * x)
    }
}

/// Linear two-node line.
pub(crate) fn line2(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let xi = p.xi;
    values[0] = 0.5 * (1.0 - xi);
    values[1] = 0.5 * (1.0 + xi);
    grads[0] = Vec3::new(-0.5, 0.0, 0.0);
    grads[1] = Vec3::new(0.5, 0.0, 0.0);
}

/// Quadratic three-node line.
pub(crate) fn line3(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    for (i, node) in LINE3_NODES.iter().enumerate() {
        let (l, dl) = quadratic(node[0], p.xi);
        values[i] = l;
        grads[i] = Vec3::new(dl, 0.0, 0.0);
    }
}

/// Cubic four-node line.
pub(crate) fn line4(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let xi = p.xi;
    let xi2 = xi * xi;

    // N0 = -(9/16)(ξ + 1/3)(ξ - 1/3)(ξ - 1)
    values[0] = -(3.0 * xi + 1.0) * (3.0 * xi - 1.0) * (xi - 1.0) / 16.0;
    // N1 = (27/16)(ξ + 1)(ξ - 1/3)(ξ - 1)
    values[1] = 27.0 * (xi + 1.0) * (xi - 1.0 / 3.0) * (xi - 1.0) / 16.0;
    // N2 = -(27/16)(ξ + 1)(ξ + 1/3)(ξ - 1)
    values[2] = -27.0 * (xi + 1.0) * (xi + 1.0 / 3.0) * (xi - 1.0) / 16.0;
    // N3 = (9/16)(ξ + 1)(ξ + 1/3)(ξ - 1/3)
    values[3] = (xi + 1.0) * (3.0 * xi + 1.0) * (3.0 * xi - 1.0) / 16.0;

    grads[0] = Vec3::new((-27.0 * xi2 + 18.0 * xi + 1.0) / 16.0, 0.0, 0.0);
    grads[1] = Vec3::new((81.0 * xi2 - 18.0 * xi - 27.0) / 16.0, 0.0, 0.0);
    grads[2] = Vec3::new((-81.0 * xi2 - 18.0 * xi + 27.0) / 16.0, 0.0, 0.0);
    grads[3] = Vec3::new((27.0 * xi2 + 18.0 * xi - 1.0) / 16.0, 0.0, 0.0);
}
