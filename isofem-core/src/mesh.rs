//! Minimal mesh provider.
//!
//! Stores nodal coordinates and element connectivity, and hands each
//! element's ordered nodal coordinate set to the shape function engine.

use crate::error::{Error, Result};
use crate::topology::ElementTopology;
use crate::types::Point3;

/// Element connectivity - node indices for an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementConnectivity {
    /// Element topology.
    pub topology: ElementTopology,
    /// Node indices (0-based), in the topology's canonical order.
    pub nodes: Vec<usize>,
}

/// Finite element mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Nodal coordinates.
    nodes: Vec<Point3>,
    /// Element connectivity.
    elements: Vec<ElementConnectivity>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(n_nodes: usize, n_elements: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n_nodes),
            elements: Vec::with_capacity(n_elements),
        }
    }

    /// Add a node to the mesh, returning its index.
    pub fn add_node(&mut self, point: Point3) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(point);
        idx
    }

    /// Add multiple nodes at once.
    pub fn add_nodes(&mut self, points: impl IntoIterator<Item = Point3>) {
        self.nodes.extend(points);
    }

    /// Add an element to the mesh, returning its index.
    pub fn add_element(&mut self, topology: ElementTopology, nodes: Vec<usize>) -> Result<usize> {
        if nodes.len() != topology.n_nodes() {
            return Err(Error::Mesh(format!(
                "{} requires {} nodes, got {}",
                topology,
                topology.n_nodes(),
                nodes.len()
            )));
        }

        if let Some(&bad) = nodes.iter().find(|&&i| i >= self.nodes.len()) {
            return Err(Error::Mesh(format!(
                "node index {} out of bounds (mesh has {} nodes)",
                bad,
                self.nodes.len()
            )));
        }

        let idx = self.elements.len();
        self.elements.push(ElementConnectivity { topology, nodes });
        Ok(idx)
    }

    /// Number of nodes in the mesh.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements in the mesh.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get nodal coordinates.
    pub fn nodes(&self) -> &[Point3] {
        &self.nodes
    }

    /// Get element connectivity.
    pub fn elements(&self) -> &[ElementConnectivity] {
        &self.elements
    }

    /// Get a specific element's connectivity.
    pub fn element(&self, idx: usize) -> Result<&ElementConnectivity> {
        self.elements.get(idx).ok_or(Error::IndexOutOfRange {
            index: idx,
            bound: self.elements.len(),
        })
    }

    /// Copy an element's nodal coordinates into `out`, replacing its contents.
    ///
    /// Reuses `out`'s allocation, so a worker can gather every element it
    /// visits into the same buffer.
    pub fn gather_coords(&self, elem_idx: usize, out: &mut Vec<Point3>) -> Result<()> {
        let elem = self.element(elem_idx)?;
        out.clear();
        out.extend(elem.nodes.iter().map(|&i| self.nodes[i]));
        Ok(())
    }

    /// Copy an element's entries of a nodal scalar field into `out`.
    pub fn gather_field(&self, elem_idx: usize, field: &[f64], out: &mut Vec<f64>) -> Result<()> {
        if field.len() != self.nodes.len() {
            return Err(Error::Mesh(format!(
                "nodal field has {} entries, mesh has {} nodes",
                field.len(),
                self.nodes.len()
            )));
        }
        let elem = self.element(elem_idx)?;
        out.clear();
        out.extend(elem.nodes.iter().map(|&i| field[i]));
        Ok(())
    }

    /// Compute mesh bounding box.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.nodes.first()?;
        Some(self.nodes[1..].iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
