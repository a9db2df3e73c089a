//! Interpolation kernels and the topology dispatch table.
//!
//! Every kernel is a closed-form Lagrange basis with the same signature:
//! given a reference coordinate it fills one value and one parametric
//! gradient per node. Gradient components beyond the parametric dimension
//! are left at zero.
//!
//! # Submodules
//!
//! - [`line`] - Line2, Line3, Line4
//! - [`tri`] - Tri3, Tri6
//! - [`quad`] - Quad4, Quad8, Quad9
//! - [`tet`] - Tet4, Tet10
//! - [`hex`] - Hex8, Hex20, Hex27
//! - [`gauss`] - Gauss quadrature rules for numerical integration

use crate::topology::ElementTopology;
use crate::types::{ReferenceCoord, Vec3};

pub mod gauss;
pub mod hex;
pub mod line;
pub mod quad;
pub mod tet;
pub mod tri;

pub use gauss::{default_rule, QuadraturePoint};

/// Shape function kernel: fills `values[i]` and `grads[i]` for every node.
///
/// Both slices have exactly one entry per node. Kernels are pure functions
/// and never allocate.
///
/// # Panics
///
/// Kernels returned by [`kernel_for`] index the slices directly and panic
/// when they are shorter than the topology's node count.
pub type KernelFn = fn(ReferenceCoord, &mut [f64], &mut [Vec3]);

/// Kernel implementing the basis of `topology`.
pub fn kernel_for(topology: ElementTopology) -> KernelFn {
    use ElementTopology::*;
    match topology {
        Line2 => line::line2,
        Line3 => line::line3,
        Line4 => line::line4,
        Tri3 => tri::tri3,
        Tri6 => tri::tri6,
        Quad4 => quad::quad4,
        Quad8 => quad::quad8,
        Quad9 => quad::quad9,
        Tet4 => tet::tet4,
        Tet10 => tet::tet10,
        Hex8 => hex::hex8,
        Hex20 => hex::hex20,
        Hex27 => hex::hex27,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval(topology: ElementTopology, p: ReferenceCoord) -> (Vec<f64>, Vec<Vec3>) {
        let n = topology.n_nodes();
        let mut values = vec![0.0; n];
        let mut grads = vec![Vec3::zeros(); n];
        kernel_for(topology)(p, &mut values, &mut grads);
        (values, grads)
    }

    /// Dense sample of the reference domain plus every reference node.
    fn sample(topology: ElementTopology) -> Vec<ReferenceCoord> {
        let mut points: Vec<ReferenceCoord> = topology
            .reference_nodes()
            .iter()
            .map(|&c| ReferenceCoord::from(c))
            .collect();

        let steps = 6;
        let dim = topology.dim();
        let axis = |k: usize| {
            if topology.is_simplex() {
                k as f64 / steps as f64
            } else {
                -1.0 + 2.0 * k as f64 / steps as f64
            }
        };

        let j_steps = if dim > 1 { steps } else { 0 };
        let k_steps = if dim > 2 { steps } else { 0 };

        for i in 0..=steps {
            for j in 0..=j_steps {
                for k in 0..=k_steps {
                    let p = ReferenceCoord::new(
                        axis(i),
                        if dim > 1 { axis(j) } else { 0.0 },
                        if dim > 2 { axis(k) } else { 0.0 },
                    );
                    if topology.is_simplex() && p.xi + p.eta + p.zeta > 1.0 + 1e-12 {
                        continue;
                    }
                    points.push(p);
                }
            }
        }
        points
    }

    #[test]
    fn test_partition_of_unity() {
        for topology in ElementTopology::ALL {
            for p in sample(topology) {
                let (values, grads) = eval(topology, p);
                let sum: f64 = values.iter().sum();
                let grad_sum: Vec3 = grads.iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
                assert_relative_eq!(grad_sum, Vec3::zeros(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_kronecker_property() {
        for topology in ElementTopology::ALL {
            for (j, &node) in topology.reference_nodes().iter().enumerate() {
                let (values, _) = eval(topology, ReferenceCoord::from(node));
                for (i, &v) in values.iter().enumerate() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(v, expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_gradients_padded_beyond_dimension() {
        for topology in ElementTopology::ALL {
            let (_, grads) = eval(topology, ReferenceCoord::new(0.2, 0.1, 0.3));
            for g in grads {
                for k in topology.dim()..3 {
                    assert_eq!(g[k], 0.0, "{topology}");
                }
            }
        }
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let h = 1e-6;
        for topology in ElementTopology::ALL {
            let p = ReferenceCoord::new(0.21, 0.17, 0.13);
            let (_, grads) = eval(topology, p);

            for k in 0..topology.dim() {
                let mut plus = p.to_array();
                let mut minus = p.to_array();
                plus[k] += h;
                minus[k] -= h;
                let (vp, _) = eval(topology, plus.into());
                let (vm, _) = eval(topology, minus.into());

                for i in 0..topology.n_nodes() {
                    let fd = (vp[i] - vm[i]) / (2.0 * h);
                    assert_relative_eq!(grads[i][k], fd, epsilon = 1e-7);
                }
            }
        }
    }
}
