//! Error types for scope tree operations.

use thiserror::Error;

use super::ScopeId;

/// Errors that can occur while navigating or mutating the scope tree.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// The handle does not name a live scope (never created, or destroyed).
    #[error("Unknown scope: {id}")]
    UnknownScope {
        /// The stale or foreign handle
        id: ScopeId,
    },

    /// The root scope lives as long as its tree.
    #[error("The root scope cannot be destroyed")]
    RootImmutable,

    /// A container expected at a location inside a scope's data is missing.
    #[error("No map at '{path}' in {scope}")]
    MissingContainer {
        /// The scope whose data was walked
        scope: ScopeId,
        /// Dotted location inside that scope's data
        path: String,
    },
}

impl ScopeError {
    /// Check if this error indicates a stale or unknown handle
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScopeError::UnknownScope { .. })
    }

    /// Get the scope handle involved, if any
    pub fn scope(&self) -> Option<ScopeId> {
        match self {
            ScopeError::UnknownScope { id } => Some(*id),
            ScopeError::MissingContainer { scope, .. } => Some(*scope),
            ScopeError::RootImmutable => None,
        }
    }
}

impl From<ScopeError> for crate::Error {
    fn from(err: ScopeError) -> Self {
        crate::Error::Scope(err)
    }
}
