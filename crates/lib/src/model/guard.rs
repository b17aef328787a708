//! Scope guard returned by [`ContentModel::scope`].

use std::ops::Deref;

use crate::scope::ScopeId;

use super::ContentModel;

/// RAII guard for a scope pushed by [`ContentModel::scope`].
///
/// Dropping the guard retracts the scope, but only while it is still the
/// current one; if it was already retracted (or something deeper is current)
/// the drop does nothing.
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    model: &'a ContentModel,
    scope: ScopeId,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn new(model: &'a ContentModel, scope: ScopeId) -> Self {
        Self { model, scope }
    }

    /// The handle of the guarded scope.
    pub fn id(&self) -> ScopeId {
        self.scope
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = ContentModel;

    fn deref(&self) -> &Self::Target {
        self.model
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.model.retract_if_current(self.scope);
    }
}
