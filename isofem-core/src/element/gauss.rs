//! Gauss quadrature rules for numerical integration.
//!
//! This module provides quadrature rules on every reference domain:
//! - 1D Gauss-Legendre on [-1, 1]
//! - Tensor-product rules on [-1, 1]² and [-1, 1]³
//! - Triangle rules (1, 3, 4 points) on the unit triangle
//! - Tetrahedral rules (1, 4, 5 points) on the unit tetrahedron
//!
//! All points are returned as [`ReferenceCoord`]s matching the kernels in
//! [`crate::element`], so they can be passed straight to
//! [`ShapeFunctionEngine::evaluate`](crate::ShapeFunctionEngine::evaluate).
//!
//! # Usage
//!
//! ```
//! use isofem_core::element::gauss::{default_rule, gauss_hex};
//! use isofem_core::ElementTopology;
//!
//! // 2×2×2 rule
//! for qp in gauss_hex(2).unwrap() {
//!     // qp.coord is (ξ, η, ζ), qp.weight the integration weight
//! }
//!
//! let rule = default_rule(ElementTopology::Tet10).unwrap();
//! assert_eq!(rule.len(), 4);
//! ```

use crate::error::{Error, Result};
use crate::topology::ElementTopology;
use crate::types::ReferenceCoord;

/// A quadrature point in reference coordinates with its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    /// Reference coordinates of the point.
    pub coord: ReferenceCoord,
    /// Integration weight.
    pub weight: f64,
}

impl QuadraturePoint {
    /// Create a new quadrature point.
    pub fn new(coord: ReferenceCoord, weight: f64) -> Self {
        Self { coord, weight }
    }

    /// Point on the triangle from area coordinates (L0, L1, L2).
    fn from_area(l: [f64; 3], weight: f64) -> Self {
        Self::new(ReferenceCoord::plane(l[1], l[2]), weight)
    }

    /// Point on the tetrahedron from volume coordinates (L0, L1, L2, L3).
    fn from_volume(l: [f64; 4], weight: f64) -> Self {
        Self::new(ReferenceCoord::new(l[1], l[2], l[3]), weight)
    }
}

fn unsupported(rule: &str, n: usize, allowed: &str) -> Error {
    Error::Configuration(format!("{rule}: n must be {allowed}, got {n}"))
}

/// 1D Gauss-Legendre quadrature points and weights.
///
/// Returns (point, weight) pairs for integration on [-1, 1].
///
/// # Arguments
///
/// * `n` - Number of integration points (1, 2, 3, or 4)
pub fn gauss_1d(n: usize) -> Result<Vec<(f64, f64)>> {
    let rule = match n {
        1 => vec![(0.0, 2.0)],
        2 => {
            let p = 1.0 / 3.0_f64.sqrt();
            vec![(-p, 1.0), (p, 1.0)]
        }
        3 => {
            let p = (3.0 / 5.0_f64).sqrt();
            vec![(-p, 5.0 / 9.0), (0.0, 8.0 / 9.0), (p, 5.0 / 9.0)]
        }
        4 => {
            // Points: ±√((3 ∓ 2√(6/5))/7)
            let sqrt_6_5 = (6.0 / 5.0_f64).sqrt();
            let p1 = ((3.0 - 2.0 * sqrt_6_5) / 7.0).sqrt();
            let p2 = ((3.0 + 2.0 * sqrt_6_5) / 7.0).sqrt();
            // Weights: (18 ± √30) / 36
            let sqrt_30 = 30.0_f64.sqrt();
            let w1 = (18.0 + sqrt_30) / 36.0;
            let w2 = (18.0 - sqrt_30) / 36.0;
            vec![(-p2, w2), (-p1, w1), (p1, w1), (p2, w2)]
        }
        _ => return Err(unsupported("gauss_1d", n, "1, 2, 3, or 4")),
    };
    Ok(rule)
}

/// Gauss-Legendre rule on the reference line, `n` points.
pub fn gauss_line(n: usize) -> Result<Vec<QuadraturePoint>> {
    Ok(gauss_1d(n)?
        .into_iter()
        .map(|(xi, w)| QuadraturePoint::new(ReferenceCoord::line(xi), w))
        .collect())
}

/// Quadrilateral Gauss quadrature points.
///
/// Tensor product of 1D rules on ξ, η ∈ [-1, 1]; returns n² points.
pub fn gauss_quad(n: usize) -> Result<Vec<QuadraturePoint>> {
    let rule_1d = gauss_1d(n)?;
    let mut points = Vec::with_capacity(n * n);

    for &(xi, w_xi) in &rule_1d {
        for &(eta, w_eta) in &rule_1d {
            points.push(QuadraturePoint::new(
                ReferenceCoord::plane(xi, eta),
                w_xi * w_eta,
            ));
        }
    }

    Ok(points)
}

/// Hexahedral Gauss quadrature points.
///
/// Tensor product of 1D rules on ξ, η, ζ ∈ [-1, 1]; returns n³ points.
///
/// # Integration Order
///
/// - n=1: Exact for polynomials up to degree 1
/// - n=2: Exact for polynomials up to degree 3 (standard for Hex8)
/// - n=3: Exact for polynomials up to degree 5 (Hex20, Hex27)
pub fn gauss_hex(n: usize) -> Result<Vec<QuadraturePoint>> {
    let rule_1d = gauss_1d(n)?;
    let mut points = Vec::with_capacity(n * n * n);

    for &(xi, w_xi) in &rule_1d {
        for &(eta, w_eta) in &rule_1d {
            for &(zeta, w_zeta) in &rule_1d {
                points.push(QuadraturePoint::new(
                    ReferenceCoord::new(xi, eta, zeta),
                    w_xi * w_eta * w_zeta,
                ));
            }
        }
    }

    Ok(points)
}

/// Triangle quadrature points on the unit triangle (0,0), (1,0), (0,1).
///
/// Weights are scaled for the unit triangle (area = 1/2).
///
/// * `n` - Number of integration points (1, 3, or 4)
pub fn gauss_tri(n: usize) -> Result<Vec<QuadraturePoint>> {
    let rule = match n {
        // centroid, degree 1
        1 => vec![QuadraturePoint::from_area([1.0 / 3.0; 3], 0.5)],
        3 => {
            // edge midpoints, degree 2
            let w = 1.0 / 6.0;
            vec![
                QuadraturePoint::from_area([0.5, 0.5, 0.0], w),
                QuadraturePoint::from_area([0.0, 0.5, 0.5], w),
                QuadraturePoint::from_area([0.5, 0.0, 0.5], w),
            ]
        }
        4 => {
            // centroid + 3 interior points, degree 3
            let w_center = -27.0 / 96.0;
            let w_corner = 25.0 / 96.0;
            vec![
                QuadraturePoint::from_area([1.0 / 3.0; 3], w_center),
                QuadraturePoint::from_area([0.6, 0.2, 0.2], w_corner),
                QuadraturePoint::from_area([0.2, 0.6, 0.2], w_corner),
                QuadraturePoint::from_area([0.2, 0.2, 0.6], w_corner),
            ]
        }
        _ => return Err(unsupported("gauss_tri", n, "1, 3, or 4")),
    };
    Ok(rule)
}

/// Tetrahedral quadrature points on the unit tetrahedron.
///
/// Weights are scaled for the unit tetrahedron (volume = 1/6).
///
/// # Integration Order
///
/// - n=1: Exact for polynomials up to degree 1 (linear)
/// - n=4: Exact for polynomials up to degree 2 (quadratic)
/// - n=5: Exact for polynomials up to degree 3 (cubic)
pub fn gauss_tet(n: usize) -> Result<Vec<QuadraturePoint>> {
    let rule = match n {
        1 => vec![QuadraturePoint::from_volume([0.25; 4], 1.0 / 6.0)],
        4 => {
            // Points at (α, β, β, β) and permutations
            // α = (5 + 3√5) / 20 ≈ 0.5854
            // β = (5 - √5) / 20 ≈ 0.1382
            let sqrt5 = 5.0_f64.sqrt();
            let alpha = (5.0 + 3.0 * sqrt5) / 20.0;
            let beta = (5.0 - sqrt5) / 20.0;
            let w = 1.0 / 24.0;
            vec![
                QuadraturePoint::from_volume([alpha, beta, beta, beta], w),
                QuadraturePoint::from_volume([beta, alpha, beta, beta], w),
                QuadraturePoint::from_volume([beta, beta, alpha, beta], w),
                QuadraturePoint::from_volume([beta, beta, beta, alpha], w),
            ]
        }
        5 => {
            // Keast rule: centroid weight -2/15, remaining points at
            // (1/2, 1/6, 1/6, 1/6) and permutations with weight 3/40
            let w_center = -2.0 / 15.0;
            let w_outer = 3.0 / 40.0;
            let a = 0.5;
            let b = 1.0 / 6.0;
            vec![
                QuadraturePoint::from_volume([0.25; 4], w_center),
                QuadraturePoint::from_volume([a, b, b, b], w_outer),
                QuadraturePoint::from_volume([b, a, b, b], w_outer),
                QuadraturePoint::from_volume([b, b, a, b], w_outer),
                QuadraturePoint::from_volume([b, b, b, a], w_outer),
            ]
        }
        _ => return Err(unsupported("gauss_tet", n, "1, 4, or 5")),
    };
    Ok(rule)
}

/// Rule of the given size for the reference domain of `topology`.
///
/// `n` counts points per direction for lines, quadrilaterals and hexahedra
/// and total points for triangles and tetrahedra.
pub fn rule_for(topology: ElementTopology, n: usize) -> Result<Vec<QuadraturePoint>> {
    use ElementTopology::*;
    match topology {
        Line2 | Line3 | Line4 => gauss_line(n),
        Tri3 | Tri6 => gauss_tri(n),
        Quad4 | Quad8 | Quad9 => gauss_quad(n),
        Tet4 | Tet10 => gauss_tet(n),
        Hex8 | Hex20 | Hex27 => gauss_hex(n),
    }
}

/// Rule size that integrates the mass matrix of `topology` on an affine
/// element.
pub fn default_order(topology: ElementTopology) -> usize {
    use ElementTopology::*;
    match topology {
        Line2 => 2,
        Line3 => 3,
        Line4 => 4,
        Tri3 => 1,
        Tri6 => 3,
        Quad4 => 2,
        Quad8 | Quad9 => 3,
        Tet4 => 1,
        Tet10 => 4,
        Hex8 => 2,
        Hex20 | Hex27 => 3,
    }
}

/// Default quadrature rule for `topology`.
pub fn default_rule(topology: ElementTopology) -> Result<Vec<QuadraturePoint>> {
    rule_for(topology, default_order(topology))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gauss_1d_integrates_polynomials() {
        // 1-point rule integrates constants exactly
        // ∫_{-1}^{1} 3 dx = 6
        let rule = gauss_1d(1).unwrap();
        let integral: f64 = rule.iter().map(|&(_, w)| 3.0 * w).sum();
        assert_relative_eq!(integral, 6.0, epsilon = 1e-14);

        // 2-point rule integrates x³ exactly (degree 2n-1 = 3)
        let rule = gauss_1d(2).unwrap();
        let integral: f64 = rule.iter().map(|&(x, w)| x.powi(3) * w).sum();
        assert_relative_eq!(integral, 0.0, epsilon = 1e-14);

        // ∫_{-1}^{1} x² dx = 2/3
        let integral: f64 = rule.iter().map(|&(x, w)| x.powi(2) * w).sum();
        assert_relative_eq!(integral, 2.0 / 3.0, epsilon = 1e-14);

        // 4-point rule integrates x⁶ exactly: 2/7
        let rule = gauss_1d(4).unwrap();
        let integral: f64 = rule.iter().map(|&(x, w)| x.powi(6) * w).sum();
        assert_relative_eq!(integral, 2.0 / 7.0, epsilon = 1e-14);
    }

    #[test]
    fn test_default_rule_for_every_topology() {
        for topology in ElementTopology::ALL {
            let rule = default_rule(topology).unwrap();
            assert!(!rule.is_empty(), "{topology}");
        }
    }

    #[test]
    fn test_weights_sum_to_reference_measure() {
        for topology in ElementTopology::ALL {
            let measure = match topology.dim() {
                1 => 2.0,
                2 if topology.is_simplex() => 0.5,
                2 => 4.0,
                _ if topology.is_simplex() => 1.0 / 6.0,
                _ => 8.0,
            };
            let sum: f64 = default_rule(topology).unwrap().iter().map(|qp| qp.weight).sum();
            assert_relative_eq!(sum, measure, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_point_counts() {
        assert_eq!(gauss_hex(1).unwrap().len(), 1);
        assert_eq!(gauss_hex(2).unwrap().len(), 8);
        assert_eq!(gauss_hex(3).unwrap().len(), 27);
        assert_eq!(gauss_quad(3).unwrap().len(), 9);
        assert_eq!(default_rule(ElementTopology::Tri6).unwrap().len(), 3);
    }

    #[test]
    fn test_tet_points_inside_reference() {
        for &n in &[1, 4, 5] {
            for qp in gauss_tet(n).unwrap() {
                let c = qp.coord;
                assert!(c.xi >= 0.0 && c.eta >= 0.0 && c.zeta >= 0.0);
                assert!(c.xi + c.eta + c.zeta <= 1.0 + 1e-14);
            }
        }
    }

    #[test]
    fn test_tet5_integrates_cubic() {
        // ∫ ξ³ dV over the unit tet = 3! / 6! = 1/120
        let integral: f64 = gauss_tet(5)
            .unwrap()
            .iter()
            .map(|qp| qp.coord.xi.powi(3) * qp.weight)
            .sum();
        assert_relative_eq!(integral, 1.0 / 120.0, epsilon = 1e-14);
    }

    #[test]
    fn test_tri4_integrates_cubic() {
        // ∫ ξ² η dA over the unit triangle = 2! 1! / 5! = 1/60
        let integral: f64 = gauss_tri(4)
            .unwrap()
            .iter()
            .map(|qp| qp.coord.xi.powi(2) * qp.coord.eta * qp.weight)
            .sum();
        assert_relative_eq!(integral, 1.0 / 60.0, epsilon = 1e-14);
    }

    #[test]
    fn test_invalid_sizes_are_configuration_errors() {
        assert!(matches!(gauss_1d(5), Err(Error::Configuration(_))));
        assert!(matches!(gauss_tet(2), Err(Error::Configuration(_))));
        assert!(matches!(gauss_tri(2), Err(Error::Configuration(_))));
        assert!(matches!(
            rule_for(ElementTopology::Hex8, 7),
            Err(Error::Configuration(_))
        ));
    }
}
