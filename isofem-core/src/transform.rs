//! Chain rule from parametric to physical gradients.

use nalgebra::Matrix3;

use crate::types::Vec3;

/// Apply `∂N/∂x_c = Σ_k (∂N/∂ξ_k)(∂ξ_k/∂x_c)` to every shape function.
///
/// `inverse` is the transform produced by
/// [`Jacobian::invert`](crate::jacobian::Jacobian::invert), with
/// `inverse[(c, k)] = ∂ξ_k/∂x_c`. `local` and `out` must have the same length.
#[inline]
pub fn to_physical(local: &[Vec3], inverse: &Matrix3<f64>, out: &mut [Vec3]) {
    debug_assert_eq!(local.len(), out.len());
    for (dst, src) in out.iter_mut().zip(local) {
        *dst = inverse * src;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaling_transform() {
        // x = 2ξ, y = 4η, z = ζ/2  =>  ∂ξ/∂x = 1/2, ∂η/∂y = 1/4, ∂ζ/∂z = 2
        let inverse = Matrix3::from_diagonal(&Vec3::new(0.5, 0.25, 2.0));
        let local = [Vec3::new(1.0, 1.0, 1.0), Vec3::new(-2.0, 0.0, 0.5)];
        let mut out = [Vec3::zeros(); 2];
        to_physical(&local, &inverse, &mut out);

        assert_relative_eq!(out[0], Vec3::new(0.5, 0.25, 2.0), epsilon = 1e-15);
        assert_relative_eq!(out[1], Vec3::new(-1.0, 0.0, 1.0), epsilon = 1e-15);
    }
}
