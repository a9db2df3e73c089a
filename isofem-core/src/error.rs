//! Error types for shape function evaluation.
//!
//! Every failure in this crate is fatal for the evaluation that produced it.
//! Nothing here retries or repairs geometry; callers escalate the error to a
//! run-level abort.

use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or evaluating shape functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Setup errors: unsupported topology, size mismatch, call order.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Jacobian determinant (or its surface/line analogue) vanished or is
    /// not finite.
    #[error(
        "singular element: {dim}D jacobian measure {measure:e} is not above tolerance {tolerance:e}"
    )]
    SingularElement {
        /// Parametric dimension of the element.
        dim: usize,
        /// Determinant, sqrt(det g) or tangent norm that failed the check.
        /// NaN for non-finite nodal coordinates.
        measure: f64,
        /// Tolerance in effect.
        tolerance: f64,
    },

    /// Solid element with a negative determinant under `Orientation::RejectInverted`.
    #[error("inverted element: jacobian determinant {determinant:e} is negative")]
    InvertedElement {
        /// Signed determinant.
        determinant: f64,
    },

    /// Shape function index outside the element.
    #[error("shape function index {index} out of range (element has {bound} shape functions)")]
    IndexOutOfRange {
        /// Offending 0-based index.
        index: usize,
        /// Number of shape functions.
        bound: usize,
    },

    /// Mesh-related errors.
    #[error("mesh error: {0}")]
    Mesh(String),

    /// Failure inside a specific element of a mesh loop.
    #[error("element {element}: {source}")]
    Element {
        /// Element index in the mesh.
        element: usize,
        /// Underlying error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the index of the mesh element that failed.
    pub fn in_element(self, element: usize) -> Self {
        Error::Element {
            element,
            source: Box::new(self),
        }
    }

    /// True for errors caused by invalid element geometry.
    pub fn is_geometric(&self) -> bool {
        match self {
            Error::SingularElement { .. } | Error::InvertedElement { .. } => true,
            Error::Element { source, .. } => source.is_geometric(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_names_index_and_bound() {
        let err = Error::IndexOutOfRange { index: 9, bound: 8 };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains('8'));
    }

    #[test]
    fn test_element_wrapper_keeps_geometric_flag() {
        let err = Error::SingularElement {
            dim: 2,
            measure: 0.0,
            tolerance: 1e-15,
        }
        .in_element(42);
        assert!(err.is_geometric());
        assert!(err.to_string().starts_with("element 42: singular element"));
        assert!(!Error::Configuration("x".into()).is_geometric());
    }
}
