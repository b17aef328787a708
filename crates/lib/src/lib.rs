//!
//! scoped-model: a hierarchical, scope-aware content model for template rendering.
//!
//! Renderers push a scope for every nested block they evaluate, write the
//! block's data into it, and read values back through the whole chain of
//! enclosing scopes. The model can flatten that chain into a single JSON view
//! for client delivery.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The closed set of storable data: text, numbers, booleans, date/times, lists and nested maps.
//! * **Paths (`path::ModelPath`)**: Dotted or slashed paths such as `lists.GoT.Starks` address nested values.
//! * **Scopes (`scope::ScopeTree`)**: An arena of nested scopes, each holding model data and attribute data.
//! * **ContentModel (`model::ContentModel`)**: The coordinator. It owns the tree and a cursor to the current scope and implements lookups, the three write localities and the JSON views.
//! * **Attributes**: Per-scope values shared between processors that never appear in any view.
//! * **Contexts (`scope::Context`)**: Read-only handles a templating engine walks while rendering.

pub mod adapter;
pub mod config;
pub mod constants;
pub mod model;
pub mod path;
pub mod scope;
pub mod value;

pub use config::{Locality, ModelConfig};
pub use model::{CacheStats, ContentModel, ScopeGuard};
pub use path::{ModelPath, PathError};
pub use scope::{Context, ScopeError, ScopeId};
pub use value::{Map, Value, ValueError, ValueKind};

/// Result type used throughout the scoped-model library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the scoped-model library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured path errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured value errors from the value and adapter modules
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured scope errors from the scope module
    #[error(transparent)]
    Scope(scope::ScopeError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Value(_) => "value",
            Error::Scope(_) => "scope",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates an empty or zero-segment path.
    pub fn is_invalid_path(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_invalid_path(),
            _ => false,
        }
    }

    /// Check if this error came from adapting a foreign object.
    pub fn is_conversion_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_conversion_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Scope(scope_err) => scope_err.is_not_found(),
            Error::Io(io_err) => io_err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error is scope-related.
    pub fn is_scope_error(&self) -> bool {
        matches!(self, Error::Scope(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
