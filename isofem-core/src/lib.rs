//! isofem core - isoparametric shape functions and Jacobians
//!
//! Evaluates interpolation functions for finite elements at reference
//! points and maps their derivatives to physical space:
//! - Closed-form Lagrange bases for 13 line, surface and solid topologies
//! - Jacobians for solids, surfaces embedded in 3D and lines in 3D
//! - Degenerate and inverted geometry detection
//! - Parallel element loops using Rayon
//!
//! # Architecture
//!
//! - [`ElementTopology`]: static node count, dimension, order and node layout
//! - [`element`]: interpolation kernels and Gauss quadrature rules
//! - [`Jacobian`]: Jacobian assembly, (pseudo)inversion and measures
//! - [`ShapeFunctionEngine`]: the façade every consumer calls
//! - [`Mesh`] and [`integrate`]: minimal mesh and parallel element loops

pub mod element;
pub mod engine;
pub mod error;
pub mod integrate;
pub mod jacobian;
pub mod mesh;
pub mod topology;
pub mod transform;
pub mod types;

pub use element::gauss::QuadraturePoint;
pub use engine::{
    DerivativeMode, EngineConfig, Orientation, ShapeEvaluation, ShapeFunctionEngine,
    SINGULAR_TOLERANCE,
};
pub use error::{Error, Result};
pub use integrate::{element_gradients, element_measures, IntegrationOptions};
pub use jacobian::{InverseJacobian, Jacobian};
pub use mesh::Mesh;
pub use topology::ElementTopology;
pub use types::{Point3, ReferenceCoord, Vec3};
