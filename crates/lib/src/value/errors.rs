//! Error types for value conversion.
//!
//! Values only fail at the edges of the model: when a foreign object has to be
//! adapted into a [`Map`](super::Map), or when a caller asks for a typed view of
//! a value that holds a different kind.

use thiserror::Error;

/// Structured error types for value operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// A foreign object could not be represented as model data
    #[error("Value conversion failed: {reason}")]
    Conversion { reason: String },

    /// A foreign object was converted, but not into a map
    #[error("Expected an object-shaped value, found {kind}")]
    NotAnObject { kind: String },

    /// Type mismatch during a typed extraction
    #[error("Value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ValueError {
    /// Check if this error came from adapting a foreign object
    pub fn is_conversion_error(&self) -> bool {
        matches!(
            self,
            ValueError::Conversion { .. } | ValueError::NotAnObject { .. }
        )
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ValueError::TypeMismatch { .. })
    }
}

impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
