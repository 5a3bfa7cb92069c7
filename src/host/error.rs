//! Error types for host document operations.

use thiserror::Error;

use super::ElementId;

/// Result type for host document operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors that can occur while manipulating the host document.
#[derive(Debug, Error)]
pub enum HostError {
    /// No element with the given id exists in the document.
    #[error("element not found: {id}")]
    ElementNotFound {
        /// The missing element id.
        id: ElementId,
    },

    /// A segment operation was attempted on an element without a
    /// straight-line body (fittings cannot be stretched).
    #[error("element {id} has no straight-line body")]
    NotACurve {
        /// The offending element id.
        id: ElementId,
    },

    /// A connector index does not exist on the element.
    #[error("element {id} has no connector {index}")]
    ConnectorOutOfRange {
        /// The element id.
        id: ElementId,
        /// The out-of-range connector index.
        index: usize,
    },

    /// A connect was attempted on a connector that is already linked.
    #[error("connector {index} of element {id} is already connected")]
    AlreadyConnected {
        /// The element id.
        id: ElementId,
        /// The connector index.
        index: usize,
    },

    /// Geometry passed to a builder was unusable (zero-length line,
    /// zero-length connector direction).
    #[error("invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of what's wrong.
        message: String,
    },

    /// The copy primitive produced no duplicates, or fewer than one per
    /// source element.
    #[error("copy produced {produced} of {requested} requested duplicates")]
    CopyFailed {
        /// Number of elements requested to copy.
        requested: usize,
        /// Number of duplicates actually produced.
        produced: usize,
    },
}

impl HostError {
    /// Creates an element-not-found error.
    #[must_use]
    pub const fn not_found(id: ElementId) -> Self {
        Self::ElementNotFound { id }
    }

    /// Creates an invalid-geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HostError::NotACurve {
            id: ElementId::new(42),
        };
        assert_eq!(err.to_string(), "element 42 has no straight-line body");
    }

    #[test]
    fn copy_failed_display() {
        let err = HostError::CopyFailed {
            requested: 3,
            produced: 0,
        };
        assert_eq!(err.to_string(), "copy produced 0 of 3 requested duplicates");
    }
}
