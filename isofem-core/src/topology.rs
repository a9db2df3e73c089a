//! Element topology catalog.
//!
//! Static metadata per supported topology: node count, parametric
//! dimension, polynomial order, name and reference node positions.

use std::fmt;
use std::str::FromStr;

use crate::element::{hex, line, quad, tet, tri};
use crate::error::{Error, Result};

/// Supported element topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTopology {
    /// 2-node linear line.
    Line2,
    /// 3-node quadratic line.
    Line3,
    /// 4-node cubic line.
    Line4,
    /// 3-node linear triangle.
    Tri3,
    /// 6-node quadratic triangle.
    Tri6,
    /// 4-node bilinear quadrilateral.
    Quad4,
    /// 8-node serendipity quadrilateral.
    Quad8,
    /// 9-node biquadratic quadrilateral.
    Quad9,
    /// 4-node linear tetrahedron.
    Tet4,
    /// 10-node quadratic tetrahedron.
    Tet10,
    /// 8-node trilinear hexahedron.
    Hex8,
    /// 20-node serendipity hexahedron.
    Hex20,
    /// 27-node triquadratic hexahedron.
    Hex27,
}

impl ElementTopology {
    /// Every supported topology, ordered by dimension then node count.
    pub const ALL: [ElementTopology; 13] = [
        ElementTopology::Line2,
        ElementTopology::Line3,
        ElementTopology::Line4,
        ElementTopology::Tri3,
        ElementTopology::Tri6,
        ElementTopology::Quad4,
        ElementTopology::Quad8,
        ElementTopology::Quad9,
        ElementTopology::Tet4,
        ElementTopology::Tet10,
        ElementTopology::Hex8,
        ElementTopology::Hex20,
        ElementTopology::Hex27,
    ];

    /// Number of nodes (equal to the number of shape functions).
    pub fn n_nodes(self) -> usize {
        use ElementTopology::*;
        match self {
            Line2 => 2,
            Line3 => 3,
            Line4 => 4,
            Tri3 => 3,
            Tri6 => 6,
            Quad4 => 4,
            Quad8 => 8,
            Quad9 => 9,
            Tet4 => 4,
            Tet10 => 10,
            Hex8 => 8,
            Hex20 => 20,
            Hex27 => 27,
        }
    }

    /// Parametric dimension (1 for lines, 2 for surfaces, 3 for solids).
    pub fn dim(self) -> usize {
        use ElementTopology::*;
        match self {
            Line2 | Line3 | Line4 => 1,
            Tri3 | Tri6 | Quad4 | Quad8 | Quad9 => 2,
            Tet4 | Tet10 | Hex8 | Hex20 | Hex27 => 3,
        }
    }

    /// Polynomial order of the basis along an edge.
    pub fn order(self) -> usize {
        use ElementTopology::*;
        match self {
            Line2 | Tri3 | Quad4 | Tet4 | Hex8 => 1,
            Line3 | Tri6 | Quad8 | Quad9 | Tet10 | Hex20 | Hex27 => 2,
            Line4 => 3,
        }
    }

    /// True for triangles and tetrahedra.
    pub fn is_simplex(self) -> bool {
        use ElementTopology::*;
        matches!(self, Tri3 | Tri6 | Tet4 | Tet10)
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        use ElementTopology::*;
        match self {
            Line2 => "line2",
            Line3 => "line3",
            Line4 => "line4",
            Tri3 => "tri3",
            Tri6 => "tri6",
            Quad4 => "quad4",
            Quad8 => "quad8",
            Quad9 => "quad9",
            Tet4 => "tet4",
            Tet10 => "tet10",
            Hex8 => "hex8",
            Hex20 => "hex20",
            Hex27 => "hex27",
        }
    }

    /// Reference coordinates of every node, in canonical order.
    pub fn reference_nodes(self) -> &'static [[f64; 3]] {
        use ElementTopology::*;
        match self {
            Line2 => &line::LINE2_NODES,
            Line3 => &line::LINE3_NODES,
            Line4 => &line::LINE4_NODES,
            Tri3 => &tri::TRI3_NODES,
            Tri6 => &tri::TRI6_NODES,
            Quad4 => &quad::QUAD4_NODES,
            Quad8 => &quad::QUAD8_NODES,
            Quad9 => &quad::QUAD9_NODES,
            Tet4 => &tet::TET4_NODES,
            Tet10 => &tet::TET10_NODES,
            Hex8 => &hex::HEX8_NODES,
            Hex20 => &hex::HEX20_NODES,
            Hex27 => &hex::HEX27_NODES,
        }
    }
}

impl fmt::Display for ElementTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementTopology {
    type Err = Error;

    /// Parse a topology name, case-insensitively. `edgeN` is accepted as an
    /// alias for `lineN`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let name = match name.strip_prefix("edge") {
            Some(rest) => format!("line{rest}"),
            None => name,
        };
        ElementTopology::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::Configuration(format!("unsupported element topology '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_nodes_match_node_count() {
        for t in ElementTopology::ALL {
            assert_eq!(t.reference_nodes().len(), t.n_nodes(), "{t}");
        }
    }

    #[test]
    fn test_dimension_and_order() {
        assert_eq!(ElementTopology::Line4.dim(), 1);
        assert_eq!(ElementTopology::Line4.order(), 3);
        assert_eq!(ElementTopology::Quad8.dim(), 2);
        assert_eq!(ElementTopology::Hex27.dim(), 3);
        assert_eq!(ElementTopology::Hex27.order(), 2);
    }

    #[test]
    fn test_parse_names() {
        for t in ElementTopology::ALL {
            assert_eq!(t.name().parse::<ElementTopology>().unwrap(), t);
        }
        assert_eq!("EDGE3".parse::<ElementTopology>().unwrap(), ElementTopology::Line3);
        assert_eq!(" Hex20 ".parse::<ElementTopology>().unwrap(), ElementTopology::Hex20);
    }

    #[test]
    fn test_parse_unknown_is_configuration_error() {
        let err = "prism6".parse::<ElementTopology>().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m.contains("prism6")));
    }
}
