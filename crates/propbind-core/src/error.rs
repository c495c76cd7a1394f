//! Error type shared by every fallible property, binding, and collection
//! operation.
//!
//! Two outcomes that look like failures are deliberately *not* errors:
//! writing to an external property that has no setter, and unbinding a
//! guest that is not bound. Both succeed without changing anything.

/// Errors raised by properties, bindings, and observable collections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The operation is structurally impossible for this property variant
    /// (for example `set` on a derived condition).
    #[error("unsupported operation: {operation}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// A required argument was malformed.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A positional collection operation was given an index past the end.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },

    /// The property's owning `Rc` has already been dropped.
    #[error("property is no longer reachable through its owning handle")]
    Detached,
}

impl PropertyError {
    /// Shorthand for [`PropertyError::Unsupported`].
    #[must_use]
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PropertyError>;
