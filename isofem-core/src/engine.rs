//! Shape function engine.
//!
//! The engine is the single entry point for consumers: it dispatches to the
//! interpolation kernel of the configured topology, builds and inverts the
//! Jacobian, and applies the chain rule. Buffers are owned by the engine and
//! sized once, so evaluation never allocates.
//!
//! # Lifecycle
//!
//! ```text
//! Unconfigured --configure()--> Configured --allocate()--> Ready
//!                                   ^                        |
//!                                   +-----configure()--------+
//! ```
//!
//! # Example
//!
//! ```
//! use isofem_core::{DerivativeMode, ElementTopology, ReferenceCoord, ShapeFunctionEngine};
//! use nalgebra::Vector3;
//!
//! let mut engine = ShapeFunctionEngine::for_topology(ElementTopology::Quad4).unwrap();
//! let square = [
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(1.0, 1.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! ];
//! let eval = engine
//!     .evaluate(ReferenceCoord::plane(0.0, 0.0), &square, DerivativeMode::Physical)
//!     .unwrap();
//! assert!((eval.determinant() - 0.25).abs() < 1e-14);
//! ```

use crate::element::{kernel_for, KernelFn};
use crate::error::{Error, Result};
use crate::jacobian::Jacobian;
use crate::topology::ElementTopology;
use crate::transform::to_physical;
use crate::types::{Point3, ReferenceCoord, Vec3};

/// Default threshold below which a Jacobian measure is treated as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-15;

/// Sign policy for solid Jacobian determinants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Report the signed determinant; inverted elements evaluate normally.
    #[default]
    Signed,
    /// Negative determinants are an [`Error::InvertedElement`].
    RejectInverted,
}

/// Engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Measures with absolute value below this are singular.
    pub singular_tolerance: f64,
    /// Sign policy for solids.
    pub orientation: Orientation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: SINGULAR_TOLERANCE,
            orientation: Orientation::Signed,
        }
    }
}

/// Which derivatives an evaluation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeMode {
    /// Build the Jacobian and map gradients to physical space.
    Physical,
    /// Skip the Jacobian: physical gradients equal parametric ones and the
    /// determinant is 1.
    Local,
}

/// Shape function values and gradients at one reference point.
///
/// Borrowed from the engine that produced it; the next call to
/// [`ShapeFunctionEngine::evaluate`] overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvaluation {
    values: Vec<f64>,
    local_grads: Vec<Vec3>,
    physical_grads: Vec<Vec3>,
    determinant: f64,
    normal: Option<Vec3>,
}

impl ShapeEvaluation {
    fn with_nodes(n: usize) -> Self {
        Self {
            values: vec![0.0; n],
            local_grads: vec![Vec3::zeros(); n],
            physical_grads: vec![Vec3::zeros(); n],
            determinant: 0.0,
            normal: None,
        }
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i < self.values.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: i,
                bound: self.values.len(),
            })
        }
    }

    fn check_field(&self, nodal: usize) -> Result<()> {
        if nodal == self.values.len() {
            Ok(())
        } else {
            Err(Error::Configuration(format!(
                "nodal field has {} entries, element has {} shape functions",
                nodal,
                self.values.len()
            )))
        }
    }

    /// Number of shape functions.
    pub fn n_functions(&self) -> usize {
        self.values.len()
    }

    /// Shape function values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Parametric gradients, zero beyond the parametric dimension.
    pub fn local_grads(&self) -> &[Vec3] {
        &self.local_grads
    }

    /// Physical gradients.
    pub fn physical_grads(&self) -> &[Vec3] {
        &self.physical_grads
    }

    /// Jacobian determinant: signed for solids, area or length scale for
    /// surfaces and lines, 1 in local mode.
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Unit normal for surface elements evaluated in physical mode.
    pub fn normal(&self) -> Option<Vec3> {
        self.normal
    }

    /// Value of shape function `i`.
    pub fn value(&self, i: usize) -> Result<f64> {
        self.check_index(i)?;
        Ok(self.values[i])
    }

    /// Parametric gradient of shape function `i`.
    pub fn local_grad(&self, i: usize) -> Result<Vec3> {
        self.check_index(i)?;
        Ok(self.local_grads[i])
    }

    /// Physical gradient of shape function `i`.
    pub fn physical_grad(&self, i: usize) -> Result<Vec3> {
        self.check_index(i)?;
        Ok(self.physical_grads[i])
    }

    /// Interpolate a nodal scalar field, `Σ N_i u_i`.
    pub fn interpolate(&self, nodal: &[f64]) -> Result<f64> {
        self.check_field(nodal.len())?;
        Ok(self.values.iter().zip(nodal).map(|(n, u)| n * u).sum())
    }

    /// Physical gradient of a nodal scalar field, `Σ ∇N_i u_i`.
    pub fn gradient(&self, nodal: &[f64]) -> Result<Vec3> {
        self.check_field(nodal.len())?;
        Ok(self
            .physical_grads
            .iter()
            .zip(nodal)
            .fold(Vec3::zeros(), |acc, (g, u)| acc + g * *u))
    }

    /// Differential measure `det J × w` for a quadrature weight.
    #[inline]
    pub fn jxw(&self, weight: f64) -> f64 {
        self.determinant * weight
    }
}

/// Basis selected by `configure` or `configure_custom`.
#[derive(Debug, Clone, Copy)]
struct Basis {
    kernel: KernelFn,
    dim: usize,
    topology: Option<ElementTopology>,
    n_nodes: Option<usize>,
}

/// Evaluates shape functions, Jacobians and physical gradients for one
/// element type.
///
/// Each parallel worker owns its own engine; the engine is `Send` but holds
/// mutable scratch buffers and is not meant to be shared.
#[derive(Debug, Clone)]
pub struct ShapeFunctionEngine {
    config: EngineConfig,
    basis: Option<Basis>,
    buffers: Option<ShapeEvaluation>,
}

impl ShapeFunctionEngine {
    /// Create an unconfigured engine with default options.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an unconfigured engine with the given options.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            basis: None,
            buffers: None,
        }
    }

    /// Configure and allocate an engine for a catalog topology.
    pub fn for_topology(topology: ElementTopology) -> Result<Self> {
        let mut engine = Self::new();
        engine.configure(topology);
        engine.allocate()?;
        Ok(engine)
    }

    /// Select a catalog topology. Discards any allocated buffers.
    pub fn configure(&mut self, topology: ElementTopology) {
        log::debug!(
            "Configuring shape functions: {} ({} nodes, {}D)",
            topology,
            topology.n_nodes(),
            topology.dim()
        );
        self.basis = Some(Basis {
            kernel: kernel_for(topology),
            dim: topology.dim(),
            topology: Some(topology),
            n_nodes: Some(topology.n_nodes()),
        });
        self.buffers = None;
    }

    /// Register a user kernel of parametric dimension `dim`.
    ///
    /// The node count is unknown until [`set_node_count`](Self::set_node_count)
    /// is called, which must happen before [`allocate`](Self::allocate).
    /// The count is not checked against the kernel: a kernel that writes
    /// more entries than the count panics in [`evaluate`](Self::evaluate).
    pub fn configure_custom(&mut self, dim: usize, kernel: KernelFn) -> Result<()> {
        if !(1..=3).contains(&dim) {
            return Err(Error::Configuration(format!(
                "custom shape functions need parametric dimension 1, 2 or 3, got {dim}"
            )));
        }
        log::warn!("Using user-supplied {}D shape functions", dim);
        self.basis = Some(Basis {
            kernel,
            dim,
            topology: None,
            n_nodes: None,
        });
        self.buffers = None;
        Ok(())
    }

    /// Fix the number of shape functions before allocation.
    pub fn set_node_count(&mut self, n: usize) -> Result<()> {
        if self.buffers.is_some() {
            return Err(Error::Configuration(
                "node count cannot change after allocate()".into(),
            ));
        }
        let basis = self
            .basis
            .as_mut()
            .ok_or_else(|| Error::Configuration("set_node_count() before configure()".into()))?;

        if n == 0 {
            return Err(Error::Configuration("node count must be positive".into()));
        }
        if let Some(topology) = basis.topology {
            if topology.n_nodes() != n {
                return Err(Error::Configuration(format!(
                    "{} has {} nodes, got {}",
                    topology,
                    topology.n_nodes(),
                    n
                )));
            }
        }
        basis.n_nodes = Some(n);
        Ok(())
    }

    /// Reserve the evaluation buffers. Must be called exactly once per
    /// configuration.
    pub fn allocate(&mut self) -> Result<()> {
        let basis = self
            .basis
            .as_ref()
            .ok_or_else(|| Error::Configuration("allocate() before configure()".into()))?;
        if self.buffers.is_some() {
            return Err(Error::Configuration("allocate() called twice".into()));
        }
        let n = basis.n_nodes.ok_or_else(|| {
            Error::Configuration("set_node_count() must precede allocate() for custom shape functions".into())
        })?;

        self.buffers = Some(ShapeEvaluation::with_nodes(n));
        Ok(())
    }

    /// Evaluate shape functions at `point` for an element with nodal
    /// coordinates `coords`.
    ///
    /// Returns a view of the engine's buffers, valid until the next call.
    pub fn evaluate(
        &mut self,
        point: ReferenceCoord,
        coords: &[Point3],
        mode: DerivativeMode,
    ) -> Result<&ShapeEvaluation> {
        let eval = self
            .buffers
            .as_mut()
            .ok_or_else(|| Error::Configuration("evaluate() before allocate()".into()))?;
        // buffers are only ever allocated from a configured basis
        let basis = self
            .basis
            .as_ref()
            .ok_or_else(|| Error::Configuration("evaluate() before configure()".into()))?;

        if coords.len() != eval.values.len() {
            return Err(Error::Configuration(format!(
                "expected {} nodal coordinates, got {}",
                eval.values.len(),
                coords.len()
            )));
        }

        (basis.kernel)(point, &mut eval.values, &mut eval.local_grads);

        match mode {
            DerivativeMode::Local => {
                eval.physical_grads.copy_from_slice(&eval.local_grads);
                eval.determinant = 1.0;
                eval.normal = None;
            }
            DerivativeMode::Physical => {
                let jacobian = Jacobian::build(basis.dim, &eval.local_grads, coords)?;
                let inverse = jacobian.invert(&self.config)?;
                to_physical(&eval.local_grads, &inverse.transform, &mut eval.physical_grads);
                eval.determinant = inverse.determinant;
                eval.normal = jacobian.normal();
            }
        }

        Ok(&*eval)
    }

    /// Configured catalog topology, `None` for custom kernels.
    pub fn topology(&self) -> Option<ElementTopology> {
        self.basis.and_then(|b| b.topology)
    }

    /// Parametric dimension of the configured basis.
    pub fn dim(&self) -> Option<usize> {
        self.basis.map(|b| b.dim)
    }

    /// Number of shape functions, once known.
    pub fn n_nodes(&self) -> Option<usize> {
        self.basis.and_then(|b| b.n_nodes)
    }

    /// True once `allocate()` has succeeded for the current configuration.
    pub fn is_ready(&self) -> bool {
        self.buffers.is_some()
    }

    /// Engine options.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ShapeFunctionEngine {
    fn default() -> Self {
        Self::new()
    }
}
