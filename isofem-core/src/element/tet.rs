//! Tetrahedral kernels (Tet4, Tet10) on the unit reference tetrahedron.
//!
//! # Natural Coordinates
//!
//! Parametric coordinates (ξ, η, ζ) with ξ, η, ζ ≥ 0 and ξ + η + ζ ≤ 1.
//! Volume coordinates:
//!
//! ```text
//! L0 = 1 - ξ - η - ζ,   L1 = ξ,   L2 = η,   L3 = ζ
//! ```
//!
//! # Node Numbering
//!
//! ```text
//!        3
//!       /|\
//!      / | \
//!     7  9  8
//!    /   |   \
//!   0----6----2      (6 on edge 2-0)
//!    \   |   /
//!     4  |  5
//!      \ | /
//!        1
//! ```
//!
//! - Corner nodes 0..3 at the origin and the unit axis points
//! - Mid-edge nodes 4 (0-1), 5 (1-2), 6 (2-0), 7 (0-3), 8 (1-3), 9 (2-3)
//!
//! # Shape Functions
//!
//! Tet10 corners: `N_i = L_i (2 L_i - 1)`, mid-edge nodes: `N_ab = 4 L_a L_b`.

use crate::types::{ReferenceCoord, Vec3};

/// Reference positions of the Tet4 nodes.
pub const TET4_NODES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Reference positions of the Tet10 nodes.
pub const TET10_NODES: [[f64; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
];

/// Corner pairs spanned by the mid-edge nodes 4..9.
const TET10_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];

/// Parametric gradients of the volume coordinates L0..L3.
const DL: [[f64; 3]; 4] = [
    [-1.0, -1.0, -1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

#[inline]
fn volume_coords(p: ReferenceCoord) -> [f64; 4] {
    [1.0 - p.xi - p.eta - p.zeta, p.xi, p.eta, p.zeta]
}

#[inline]
fn dl(i: usize) -> Vec3 {
    Vec3::new(DL[i][0], DL[i][1], DL[i][2])
}

/// Linear four-node tetrahedron.
pub(crate) fn tet4(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let l = volume_coords(p);
    for i in 0..4 {
        values[i] = l[i];
        grads[i] = dl(i);
    }
}

/// Quadratic ten-node tetrahedron.
pub(crate) fn tet10(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let l = volume_coords(p);

    for i in 0..4 {
        values[i] = l[i] * (2.0 * l[i] - 1.0);
        grads[i] = dl(i) * (4.0 * l[i] - 1.0);
    }

    for (k, &(a, b)) in TET10_EDGES.iter().enumerate() {
        values[4 + k] = 4.0 * l[a] * l[b];
        grads[4 + k] = (dl(a) * l[b] + dl(b) * l[a]) * 4.0;
    }
}
