//! Hexahedral kernels (Hex8, Hex20, Hex27) on ξ, η, ζ ∈ [-1, 1]³.
//!
//! # Node Numbering
//!
//! ```text
//!        7-------6
//!       /|      /|
//!      / |     / |
//!     4-------5  |
//!     |  3----|--2
//!     | /     | /
//!     |/      |/
//!     0-------1
//! ```
//!
//! Corners (all orders):
//!
//! ```text
//! Node 0: (-1, -1, -1)    Node 4: (-1, -1, +1)
//! Node 1: (+1, -1, -1)    Node 5: (+1, -1, +1)
//! Node 2: (+1, +1, -1)    Node 6: (+1, +1, +1)
//! Node 3: (-1, +1, -1)    Node 7: (-1, +1, +1)
//! ```
//!
//! Mid-edge nodes follow the VTK convention: 8..11 on the bottom face
//! (edges 0-1, 1-2, 2-3, 3-0), 12..15 on the top face (edges 4-5, 5-6, 6-7,
//! 7-4), then 16..19 on the vertical edges (0-4, 1-5, 2-6, 3-7).
//!
//! Hex27 adds face centres 20 (ξ=-1), 21 (ξ=+1), 22 (η=-1), 23 (η=+1),
//! 24 (ζ=-1), 25 (ζ=+1) and the body centre 26.

use super::line::quadratic;
use crate::types::{ReferenceCoord, Vec3};

/// Natural coordinates for each of the 8 corners.
/// Node i has natural coordinates (XI[i], ETA[i], ZETA[i]).
const XI: [f64; 8] = [-1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0];
const ETA: [f64; 8] = [-1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0];
const ZETA: [f64; 8] = [-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0];

/// Reference positions of the Hex8 nodes.
pub const HEX8_NODES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Reference positions of the Hex20 nodes.
pub const HEX20_NODES: [[f64; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [0.0, -1.0, -1.0], // 8 (edge 0-1)
    [1.0, 0.0, -1.0],  // 9 (edge 1-2)
    [0.0, 1.0, -1.0],  // 10 (edge 2-3)
    [-1.0, 0.0, -1.0], // 11 (edge 3-0)
    [0.0, -1.0, 1.0],  // 12 (edge 4-5)
    [1.0, 0.0, 1.0],   // 13 (edge 5-6)
    [0.0, 1.0, 1.0],   // 14 (edge 6-7)
    [-1.0, 0.0, 1.0],  // 15 (edge 7-4)
    [-1.0, -1.0, 0.0], // 16 (edge 0-4)
    [1.0, -1.0, 0.0],  // 17 (edge 1-5)
    [1.0, 1.0, 0.0],   // 18 (edge 2-6)
    [-1.0, 1.0, 0.0],  // 19 (edge 3-7)
];

/// Reference positions of the Hex27 nodes.
pub const HEX27_NODES: [[f64; 3]; 27] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [0.0, -1.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, -1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0], // 20 (face ξ=-1)
    [1.0, 0.0, 0.0],  // 21 (face ξ=+1)
    [0.0, -1.0, 0.0], // 22 (face η=-1)
    [0.0, 1.0, 0.0],  // 23 (face η=+1)
    [0.0, 0.0, -1.0], // 24 (face ζ=-1)
    [0.0, 0.0, 1.0],  // 25 (face ζ=+1)
    [0.0, 0.0, 0.0],  // 26 (centre)
];

/// Hex20 node classification by which natural coordinate is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
enum NodeType {
    Corner,
    MidEdgeXi,   // ξ = 0
    MidEdgeEta,  // η = 0
    MidEdgeZeta, // ζ = 0
}

impl NodeType {
    fn of(node: &[f64; 3]) -> Self {
        if node[0] == 0.0 {
            NodeType::MidEdgeXi
        } else if node[1] == 0.0 {
            NodeType::MidEdgeEta
        } else if node[2] == 0.0 {
            NodeType::MidEdgeZeta
        } else {
            NodeType::Corner
        }
    }
}

/// Trilinear eight-node hexahedron.
pub(crate) fn hex8(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let (xi, eta, zeta) = (p.xi, p.eta, p.zeta);

    for i in 0..8 {
        let a = 1.0 + XI[i] * xi;
        let b = 1.0 + ETA[i] * eta;
        let c = 1.0 + ZETA[i] * zeta;

        values[i] = 0.125 * a * b * c;
        grads[i] = Vec3::new(
            0.125 * XI[i] * b * c,
            0.125 * a * ETA[i] * c,
            0.125 * a * b * ZETA[i],
        );
    }
}

/// Twenty-node serendipity hexahedron.
pub(crate) fn hex20(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    let (xi, eta, zeta) = (p.xi, p.eta, p.zeta);

    for (i, node) in HEX20_NODES.iter().enumerate() {
        let (xi_i, eta_i, zeta_i) = (node[0], node[1], node[2]);

        match NodeType::of(node) {
            NodeType::Corner => {
                // N_i = (1/8) a b c (ξ_i ξ + η_i η + ζ_i ζ - 2)
                let a = 1.0 + xi_i * xi;
                let b = 1.0 + eta_i * eta;
                let c = 1.0 + zeta_i * zeta;
                let s = xi_i * xi + eta_i * eta + zeta_i * zeta - 2.0;

                values[i] = 0.125 * a * b * c * s;
                grads[i] = Vec3::new(
                    0.125 * xi_i * b * c * (s + a),
                    0.125 * eta_i * a * c * (s + b),
                    0.125 * zeta_i * a * b * (s + c),
                );
            }
            NodeType::MidEdgeXi => {
                // N_i = (1/4)(1 - ξ²)(1 + η_i η)(1 + ζ_i ζ)
                let b = 1.0 + eta_i * eta;
                let c = 1.0 + zeta_i * zeta;
                let q = 1.0 - xi * xi;

                values[i] = 0.25 * q * b * c;
                grads[i] = Vec3::new(-0.5 * xi * b * c, 0.25 * q * eta_i * c, 0.25 * q * b * zeta_i);
            }
            NodeType::MidEdgeEta => {
                let a = 1.0 + xi_i * xi;
                let c = 1.0 + zeta_i * zeta;
                let q = 1.0 - eta * eta;

                values[i] = 0.25 * a * q * c;
                grads[i] = Vec3::new(0.25 * xi_i * q * c, -0.5 * eta * a * c, 0.25 * a * q * zeta_i);
            }
            NodeType::MidEdgeZeta => {
                let a = 1.0 + xi_i * xi;
                let b = 1.0 + eta_i * eta;
                let q = 1.0 - zeta * zeta;

                values[i] = 0.25 * a * b * q;
                grads[i] = Vec3::new(0.25 * xi_i * b * q, 0.25 * a * eta_i * q, -0.5 * zeta * a * b);
            }
        }
    }
}

/// Twenty-seven-node triquadratic hexahedron.
pub(crate) fn hex27(p: ReferenceCoord, values: &mut [f64], grads: &mut [Vec3]) {
    for (i, node) in HEX27_NODES.iter().enumerate() {
        let (lx, dlx) = quadratic(node[0], p.xi);
        let (ly, dly) = quadratic(node[1], p.eta);
        let (lz, dlz) = quadratic(node[2], p.zeta);

        values[i] = lx * ly * lz;
        grads[i] = Vec3::new(dlx * ly * lz, lx * dly * lz, lx * ly * dlz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex8_corner_table_matches_nodes() {
        for i in 0..8 {
            assert_eq!(HEX8_NODES[i], [XI[i], ETA[i], ZETA[i]]);
        }
    }

    #[test]
    fn test_hex8_center_gradients() {
        let mut n = [0.0; 8];
        let mut g = [Vec3::zeros(); 8];
        hex8(ReferenceCoord::new(0.0, 0.0, 0.0), &mut n, &mut g);
        assert_eq!(n, [0.125; 8]);
        assert_eq!(g[6], Vec3::new(0.125, 0.125, 0.125));
        assert_eq!(g[0], Vec3::new(-0.125, -0.125, -0.125));
    }

    #[test]
    fn test_hex20_midedge_classification() {
        assert_eq!(NodeType::of(&HEX20_NODES[3]), NodeType::Corner);
        assert_eq!(NodeType::of(&HEX20_NODES[8]), NodeType::MidEdgeXi);
        assert_eq!(NodeType::of(&HEX20_NODES[9]), NodeType::MidEdgeEta);
        assert_eq!(NodeType::of(&HEX20_NODES[17]), NodeType::MidEdgeZeta);
    }

    #[test]
    fn test_hex20_reproduces_serendipity_field() {
        // ξ² η is in the serendipity space
        let f = |c: &[f64; 3]| c[0] * c[0] * c[1];
        let p = ReferenceCoord::new(0.3, -0.4, 0.6);
        let mut n = [0.0; 20];
        let mut g = [Vec3::zeros(); 20];
        hex20(p, &mut n, &mut g);

        let interp: f64 = (0..20).map(|i| n[i] * f(&HEX20_NODES[i])).sum();
        let grad: Vec3 = (0..20).map(|i| g[i] * f(&HEX20_NODES[i])).sum();
        assert_relative_eq!(interp, p.xi * p.xi * p.eta, epsilon = 1e-14);
        assert_relative_eq!(
            grad,
            Vec3::new(2.0 * p.xi * p.eta, p.xi * p.xi, 0.0),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_hex27_reproduces_triquadratic() {
        let f = |c: &[f64; 3]| c[0] * c[0] * c[1] * c[1] * c[2] * c[2];
        let p = ReferenceCoord::new(-0.2, 0.5, 0.8);
        let mut n = [0.0; 27];
        let mut g = [Vec3::zeros(); 27];
        hex27(p, &mut n, &mut g);

        let interp: f64 = (0..27).map(|i| n[i] * f(&HEX27_NODES[i])).sum();
        assert_relative_eq!(interp, f(&p.to_array()), epsilon = 1e-14);
    }
}
