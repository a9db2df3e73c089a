//! Parametric-to-physical Jacobians.
//!
//! The Jacobian is stored row-per-parametric-direction:
//!
//! ```text
//! J = [∂x/∂ξ  ∂y/∂ξ  ∂z/∂ξ]
//!     [∂x/∂η  ∂y/∂η  ∂z/∂η]
//!     [∂x/∂ζ  ∂y/∂ζ  ∂z/∂ζ]
//! ```
//!
//! with only the first `dim` rows present. Solids invert J directly; surfaces
//! and lines embedded in 3D use the metric `g = J Jᵀ` and the pseudoinverse
//! `Jᵀ g⁻¹`, which yields the tangential part of the physical gradient.
//!
//! Every inverse is returned as a 3×3 transform `P` with `P[(c, k)] =
//! ∂ξ_k/∂x_c`, so that `∇ₓN = P ∇_ξN` for all three element dimensions.

use nalgebra::{Matrix2, Matrix2x3, Matrix3};

use crate::engine::{EngineConfig, Orientation};
use crate::error::{Error, Result};
use crate::types::{Point3, Vec3};

/// Jacobian of the isoparametric map at one reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jacobian {
    /// Line element: tangent dx/dξ.
    Curve(Vec3),
    /// Surface element: rows dx/dξ and dx/dη.
    Surface(Matrix2x3<f64>),
    /// Solid element: rows dx/dξ, dx/dη, dx/dζ.
    Solid(Matrix3<f64>),
}

/// Inverse (or pseudoinverse) Jacobian and the differential measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseJacobian {
    /// Transform from parametric to physical gradients.
    pub transform: Matrix3<f64>,
    /// Signed determinant for solids, length or area scale otherwise.
    pub determinant: f64,
}

impl Jacobian {
    /// Assemble J[k][c] = Σ_i localGrads_i[k] · coord_i[c].
    pub fn build(dim: usize, local_grads: &[Vec3], coords: &[Point3]) -> Result<Self> {
        if local_grads.len() != coords.len() {
            return Err(Error::Configuration(format!(
                "{} shape function gradients but {} nodal coordinates",
                local_grads.len(),
                coords.len()
            )));
        }

        // Row k of the full product; rows beyond dim come from zero padding.
        let mut j = Matrix3::zeros();
        for (dn, x) in local_grads.iter().zip(coords) {
            j += dn * x.transpose();
        }

        match dim {
            1 => Ok(Jacobian::Curve(j.row(0).transpose())),
            2 => Ok(Jacobian::Surface(j.fixed_rows::<2>(0).into_owned())),
            3 => Ok(Jacobian::Solid(j)),
            _ => Err(Error::Configuration(format!(
                "parametric dimension must be 1, 2 or 3, got {dim}"
            ))),
        }
    }

    /// Parametric dimension.
    pub fn dim(&self) -> usize {
        match self {
            Jacobian::Curve(_) => 1,
            Jacobian::Surface(_) => 2,
            Jacobian::Solid(_) => 3,
        }
    }

    /// Signed determinant for solids; sqrt(det g) for surfaces; tangent
    /// length for lines.
    pub fn determinant(&self) -> f64 {
        match self {
            Jacobian::Curve(t) => t.norm(),
            Jacobian::Surface(j) => surface_cross(j).norm(),
            Jacobian::Solid(j) => triple_product(j),
        }
    }

    /// Unit normal of a surface element, `(J_ξ × J_η) / ‖J_ξ × J_η‖`.
    ///
    /// `None` for lines and solids, and for degenerate surfaces.
    pub fn normal(&self) -> Option<Vec3> {
        match self {
            Jacobian::Surface(j) => surface_cross(j).try_normalize(0.0),
            _ => None,
        }
    }

    /// Invert the Jacobian, checking for singular and inverted geometry.
    pub fn invert(&self, config: &EngineConfig) -> Result<InverseJacobian> {
        let tolerance = config.singular_tolerance;
        let determinant = self.determinant();

        // NaN or infinite coordinates must not pass as a valid element
        if !determinant.is_finite() || determinant.abs() < tolerance {
            log::error!(
                "Singular {}D jacobian: measure {:e}, tolerance {:e}",
                self.dim(),
                determinant,
                tolerance
            );
            return Err(Error::SingularElement {
                dim: self.dim(),
                measure: determinant,
                tolerance,
            });
        }

        let transform = match self {
            Jacobian::Curve(t) => {
                let mut p = Matrix3::zeros();
                p.set_column(0, &(t / t.norm_squared()));
                p
            }
            Jacobian::Surface(j) => {
                let g: Matrix2<f64> = j * j.transpose();
                let det_g = g[(0, 0)] * g[(1, 1)] - g[(0, 1)] * g[(1, 0)];
                let g_inv = Matrix2::new(g[(1, 1)], -g[(0, 1)], -g[(1, 0)], g[(0, 0)]) / det_g;
                let pseudo = j.transpose() * g_inv;

                let mut p = Matrix3::zeros();
                p.fixed_columns_mut::<2>(0).copy_from(&pseudo);
                p
            }
            Jacobian::Solid(j) => {
                if determinant < 0.0 && config.orientation == Orientation::RejectInverted {
                    log::error!("Inverted element: jacobian determinant {:e}", determinant);
                    return Err(Error::InvertedElement { determinant });
                }
                solid_inverse(j, determinant)
            }
        };

        Ok(InverseJacobian {
            transform,
            determinant,
        })
    }
}

fn surface_cross(j: &Matrix2x3<f64>) -> Vec3 {
    let a: Vec3 = j.row(0).transpose();
    let b: Vec3 = j.row(1).transpose();
    a.cross(&b)
}

fn triple_product(j: &Matrix3<f64>) -> f64 {
    let r0: Vec3 = j.row(0).transpose();
    let r1: Vec3 = j.row(1).transpose();
    let r2: Vec3 = j.row(2).transpose();
    r0.dot(&r1.cross(&r2))
}

/// Adjugate inverse: the columns of J⁻¹ are the cross products of the rows
/// of J, divided by det J.
fn solid_inverse(j: &Matrix3<f64>, det: f64) -> Matrix3<f64> {
    let r0: Vec3 = j.row(0).transpose();
    let r1: Vec3 = j.row(1).transpose();
    let r2: Vec3 = j.row(2).transpose();
    Matrix3::from_columns(&[r1.cross(&r2), r2.cross(&r0), r0.cross(&r1)]) / det
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn grads_2d(g: &[[f64; 2]]) -> Vec<Vec3> {
        g.iter().map(|d| Vector3::new(d[0], d[1], 0.0)).collect()
    }

    #[test]
    fn test_solid_inverse_matches_nalgebra() {
        let j = Matrix3::new(2.0, 0.3, -0.1, 0.2, 1.5, 0.4, -0.3, 0.1, 0.9);
        let inv = solid_inverse(&j, triple_product(&j));
        assert_relative_eq!(triple_product(&j), j.determinant(), epsilon = 1e-14);
        assert_relative_eq!(inv, j.try_inverse().unwrap(), epsilon = 1e-14);
    }

    #[test]
    fn test_tilted_surface_area_and_normal() {
        // Unit square (Tri3 on the reference triangle) rotated into the plane x = z
        let local = grads_2d(&[[-1.0, -1.0], [1.0, 0.0], [0.0, 1.0]]);
        let coords = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let jac = Jacobian::build(2, &local, &coords).unwrap();
        assert_relative_eq!(jac.determinant(), 2.0_f64.sqrt(), epsilon = 1e-14);

        let n = jac.normal().unwrap();
        let s = 1.0 / 2.0_f64.sqrt();
        assert_relative_eq!(n, Vector3::new(-s, 0.0, s), epsilon = 1e-14);

        // P Jᵀ restricted to the tangent plane is the projector I - n nᵀ
        let inv = jac.invert(&EngineConfig::default()).unwrap();
        let Jacobian::Surface(j) = jac else { unreachable!() };
        let projector = inv.transform.fixed_columns::<2>(0) * j;
        assert_relative_eq!(
            projector,
            Matrix3::identity() - n * n.transpose(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_curve_transform() {
        let local = vec![Vector3::new(-0.5, 0.0, 0.0), Vector3::new(0.5, 0.0, 0.0)];
        let coords = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 4.0)];
        let jac = Jacobian::build(1, &local, &coords).unwrap();
        assert_relative_eq!(jac.determinant(), 2.5, epsilon = 1e-14);

        let inv = jac.invert(&EngineConfig::default()).unwrap();
        // dξ/dx = t / |t|², t = (0, 1.5, 2)
        assert_relative_eq!(
            inv.transform.column(0).into_owned(),
            Vector3::new(0.0, 1.5, 2.0) / 6.25,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_inverted_solid() {
        let j = Jacobian::Solid(Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0)));
        let signed = j.invert(&EngineConfig::default()).unwrap();
        assert_eq!(signed.determinant, -1.0);

        let strict = EngineConfig {
            orientation: Orientation::RejectInverted,
            ..EngineConfig::default()
        };
        assert_eq!(
            j.invert(&strict),
            Err(Error::InvertedElement { determinant: -1.0 })
        );
    }

    #[test]
    fn test_singular_and_bad_dimension() {
        let zero = Jacobian::Surface(Matrix2x3::zeros());
        assert!(matches!(
            zero.invert(&EngineConfig::default()),
            Err(Error::SingularElement { dim: 2, .. })
        ));
        assert!(zero.normal().is_none());

        let nan = Jacobian::Solid(Matrix3::from_element(f64::NAN));
        assert!(matches!(
            nan.invert(&EngineConfig::default()),
            Err(Error::SingularElement { dim: 3, .. })
        ));
        let inf = Jacobian::Curve(Vector3::new(f64::INFINITY, 0.0, 0.0));
        assert!(matches!(
            inf.invert(&EngineConfig::default()),
            Err(Error::SingularElement { dim: 1, .. })
        ));

        let g = vec![Vector3::zeros(); 2];
        let x = vec![Vector3::zeros(); 2];
        assert!(matches!(Jacobian::build(4, &g, &x), Err(Error::Configuration(_))));
        assert!(matches!(Jacobian::build(1, &g, &x[..1]), Err(Error::Configuration(_))));
    }
}
