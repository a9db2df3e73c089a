//! Triangle kernels (Tri3, Tri6) on the unit reference triangle.
//!
//! # Natural Coordinates
//!
//! Parametric coordinates (ξ, η) with ξ, η ≥ 0 and ξ + η ≤ 1. The area
//! coordinates are
//!
//! ```text
//! L0 = 1 - ξ - η,   L1 = ξ,   L2 = η
//! ```
//!
//! # Node Numbering
//!
//! ```text
//!  2
//!  |\
//!  | \
//!  5  4
//!  |   \
//!  |    \
//!  0--3--1
//! ```
//!
//! - Corner nodes 0, 1, 2 at (0,0), (1,0), (0,1)
//! - Mid-edge nodes 3 (edge 0-1), 4 (edge 1-2), 5 (edge 2-0)

use crate::types::{ReferenceCoord, Vec3};

/// Reference positions of the Tri3 nodes.
pub const TRI3_NODES: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Reference positions of the Tri6 nodes.
pub const TRI6_NODES: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
];

/// Linear three-node triangle.
pub(crate) fn tri3(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    values[0] = 1.0 - p.xi - p.eta;
    values[1] = p.xi;
    values[2] = p.eta;

    grads[0] = Vec3::new(-1.0, -1.0, 0.0);
    grads[1] = Vec3::new(1.0, 0.0, 0.0);
    grads[2] = Vec3::new(0.0, 1.0, 0.0);
}

/// Quadratic six-node triangle.
pub(crate) fn tri6(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let l0 = 1.0 - p.xi - p.eta;
    let l1 = p.xi;
    let l2 = p.eta;

    values[0] = l0 * (2.0 * l0 - 1.0);
    values[1] = l1 * (2.0 * l1 - 1.0);
    values[2] = l2 * (2.0 * l2 - 1.0);
    values[3] = 4.0 * l0 * l1;
    values[4] = 4.0 * l1 * l2;
    values[5] = 4.0 * l2 * l0;

    // dL0 = (-1, -1), dL1 = (1, 0), dL2 = (0, 1)
    grads[0] = Vec3::new(1.0 - 4.0 * l0, 1.0 - 4.0 * l0, 0.0);
    grads[1] = Vec3::new(4.0 * l1 - 1.0, 0.0, 0.0);
    grads[2] = Vec3::new(0.0, 4.0 * l2 - 1.0, 0.0);
    grads[3] = Vec3::new(4.0 * (l0 - l1), -4.0 * l1, 0.0);
    grads[4] = Vec3::new(4.0 * l2, 4.0 * l1, 0.0);
    grads[5] = Vec3::new(-4.0 * l2, 4.0 * (l0 - l2), 0.0);
}
