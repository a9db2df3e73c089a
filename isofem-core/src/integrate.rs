//! Parallel element loops.
//!
//! Integrates per-element quantities over a [`Mesh`] using Rayon. Every
//! worker owns private [`ShapeFunctionEngine`]s (one per topology it meets)
//! and gather buffers, so the loop body never allocates once a worker has
//! seen each topology.
//!
//! The first failing element aborts the run; its error is wrapped in
//! [`Error::Element`] with the element index.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::element::gauss::{default_rule, rule_for, QuadraturePoint};
use crate::engine::{DerivativeMode, EngineConfig, ShapeFunctionEngine};
use crate::error::{Error, Result};
use crate::mesh::{ElementConnectivity, Mesh};
use crate::topology::ElementTopology;
use crate::types::{Point3, Vec3};

/// Integration options.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrationOptions {
    /// Engine configuration used by every worker.
    pub engine: EngineConfig,
    /// Quadrature rule size; `None` selects the default rule per topology.
    pub order: Option<usize>,
}

type Rules = HashMap<ElementTopology, Vec<QuadraturePoint>>;

/// Quadrature rules for every topology present in the mesh.
fn rules_for(mesh: &Mesh, options: &IntegrationOptions) -> Result<Rules> {
    let mut rules = Rules::new();
    for conn in mesh.elements() {
        if rules.contains_key(&conn.topology) {
            continue;
        }
        let rule = match options.order {
            Some(n) => rule_for(conn.topology, n)?,
            None => default_rule(conn.topology)?,
        };
        rules.insert(conn.topology, rule);
    }
    Ok(rules)
}

/// Per-worker scratch state.
struct Worker {
    config: EngineConfig,
    engines: HashMap<ElementTopology, ShapeFunctionEngine>,
    coords: Vec<Point3>,
    field: Vec<f64>,
}

/// Engine for `topology`, created and allocated on first use.
fn engine_for(
    engines: &mut HashMap<ElementTopology, ShapeFunctionEngine>,
    config: EngineConfig,
    topology: ElementTopology,
) -> Result<&mut ShapeFunctionEngine> {
    match engines.entry(topology) {
        Entry::Occupied(e) => Ok(e.into_mut()),
        Entry::Vacant(e) => {
            let mut engine = ShapeFunctionEngine::with_config(config);
            engine.configure(topology);
            engine.allocate()?;
            Ok(e.insert(engine))
        }
    }
}

impl Worker {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            engines: HashMap::new(),
            coords: Vec::new(),
            field: Vec::new(),
        }
    }

    /// Σ det J × w over the element.
    fn measure(
        &mut self,
        mesh: &Mesh,
        idx: usize,
        conn: &ElementConnectivity,
        rule: &[QuadraturePoint],
    ) -> Result<f64> {
        mesh.gather_coords(idx, &mut self.coords)?;
        let engine = engine_for(&mut self.engines, self.config, conn.topology)?;

        let mut total = 0.0;
        for qp in rule {
            total += engine
                .evaluate(qp.coord, &self.coords, DerivativeMode::Physical)?
                .jxw(qp.weight);
        }
        Ok(total)
    }

    /// Measure-weighted mean gradient of a nodal field over the element.
    fn mean_gradient(
        &mut self,
        mesh: &Mesh,
        idx: usize,
        conn: &ElementConnectivity,
        rule: &[QuadraturePoint],
        field: &[f64],
    ) -> Result<Vec3> {
        mesh.gather_coords(idx, &mut self.coords)?;
        mesh.gather_field(idx, field, &mut self.field)?;
        let engine = engine_for(&mut self.engines, self.config, conn.topology)?;

        let mut measure = 0.0;
        let mut integral = Vec3::zeros();
        for qp in rule {
            let eval = engine.evaluate(qp.coord, &self.coords, DerivativeMode::Physical)?;
            let dv = eval.jxw(qp.weight);
            integral += eval.gradient(&self.field)? * dv;
            measure += dv;
        }

        // signed point measures of a folded solid can cancel
        let tolerance = self.config.singular_tolerance;
        if !measure.is_finite() || measure.abs() < tolerance {
            return Err(Error::SingularElement {
                dim: conn.topology.dim(),
                measure,
                tolerance,
            });
        }
        Ok(integral / measure)
    }
}

/// Run `body` over every element in parallel with one [`Worker`] per task.
fn par_elements<T, F>(mesh: &Mesh, options: &IntegrationOptions, body: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&mut Worker, usize, &ElementConnectivity, &[QuadraturePoint]) -> Result<T> + Sync + Send,
{
    let rules = rules_for(mesh, options)?;
    let config = options.engine;

    mesh.elements()
        .par_iter()
        .enumerate()
        .map_init(
            || Worker::new(config),
            |worker, (idx, conn)| {
                let rule = rules.get(&conn.topology).map(Vec::as_slice).unwrap_or(&[]);
                body(worker, idx, conn, rule).map_err(|e| e.in_element(idx))
            },
        )
        .collect()
}

/// Length, area or volume of every element.
///
/// Solids with inverted node order contribute a negative measure unless
/// `options.engine.orientation` rejects them.
pub fn element_measures(mesh: &Mesh, options: &IntegrationOptions) -> Result<Vec<f64>> {
    let measures = par_elements(mesh, options, |worker, idx, conn, rule| {
        worker.measure(mesh, idx, conn, rule)
    })?;

    log::debug!(
        "Integrated {} elements, total measure {:e}",
        measures.len(),
        measures.iter().sum::<f64>()
    );
    Ok(measures)
}

/// Element-averaged physical gradient of a nodal scalar field.
///
/// `field` holds one value per mesh node.
pub fn element_gradients(
    mesh: &Mesh,
    field: &[f64],
    options: &IntegrationOptions,
) -> Result<Vec<Vec3>> {
    if field.len() != mesh.n_nodes() {
        return Err(Error::Mesh(format!(
            "nodal field has {} entries, mesh has {} nodes",
            field.len(),
            mesh.n_nodes()
        )));
    }

    let gradients = par_elements(mesh, options, |worker, idx, conn, rule| {
        worker.mean_gradient(mesh, idx, conn, rule, field)
    })?;

    log::debug!("Recovered gradients for {} elements", gradients.len());
    Ok(gradients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn two_triangles() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_nodes([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]);
        mesh.add_element(ElementTopology::Tri3, vec![0, 1, 2]).unwrap();
        mesh.add_element(ElementTopology::Tri3, vec![0, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn test_triangle_areas() {
        let areas = element_measures(&two_triangles(), &IntegrationOptions::default()).unwrap();
        assert_eq!(areas.len(), 2);
        for a in areas {
            assert_relative_eq!(a, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_linear_field_gradient() {
        let mesh = two_triangles();
        let field: Vec<f64> = mesh.nodes().iter().map(|x| x.x - 4.0 * x.y).collect();
        let grads = element_gradients(&mesh, &field, &IntegrationOptions::default()).unwrap();
        for g in grads {
            assert_relative_eq!(g, Vector3::new(1.0, -4.0, 0.0), epsilon = 1e-13);
        }
        assert!(matches!(
            element_gradients(&mesh, &field[..2], &IntegrationOptions::default()),
            Err(Error::Mesh(_))
        ));
    }

    #[test]
    fn test_error_names_failing_element() {
        let mut mesh = two_triangles();
        // collinear triangle
        mesh.add_node(Vector3::new(4.0, 0.0, 0.0));
        mesh.add_element(ElementTopology::Tri3, vec![0, 1, 4]).unwrap();

        let err = element_measures(&mesh, &IntegrationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Element { element: 2, .. }));
        assert!(err.is_geometric());
    }

    #[test]
    fn test_folded_hex_gradient_is_singular() {
        // x = ξ, y = η, z = ξζ: det J = ξ changes sign across the element
        let mut mesh = Mesh::new();
        mesh.add_nodes(
            ElementTopology::Hex8
                .reference_nodes()
                .iter()
                .map(|c| Vector3::new(c[0], c[1], c[0] * c[2])),
        );
        mesh.add_element(ElementTopology::Hex8, (0..8).collect()).unwrap();

        let volumes = element_measures(&mesh, &IntegrationOptions::default()).unwrap();
        assert_relative_eq!(volumes[0], 0.0, epsilon = 1e-14);

        let field: Vec<f64> = mesh.nodes().iter().map(|x| x.x).collect();
        let err = element_gradients(&mesh, &field, &IntegrationOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Element { element: 0, ref source }
                if matches!(**source, Error::SingularElement { dim: 3, .. })
        ));
    }

    #[test]
    fn test_explicit_order() {
        let options = IntegrationOptions {
            order: Some(4),
            ..IntegrationOptions::default()
        };
        let areas = element_measures(&two_triangles(), &options).unwrap();
        assert_relative_eq!(areas[0], 1.0, epsilon = 1e-14);

        let bad = IntegrationOptions {
            order: Some(2),
            ..IntegrationOptions::default()
        };
        assert!(matches!(
            element_measures(&two_triangles(), &bad),
            Err(Error::Configuration(_))
        ));
    }
}
