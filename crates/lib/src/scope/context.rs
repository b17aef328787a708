//! Read-only view of one scope for the templating engine.
//!
//! A [`Context`] is what a renderer walks while evaluating a template: it can
//! resolve paths through the scope chain, read attributes with `data`, and hop
//! to the parent scope. It borrows the tree, so it only lives inside
//! [`ContentModel::with_context`](crate::ContentModel::with_context) and
//! friends, while the model's read lock is held.

use crate::{
    path::{self, attribute_name},
    value::{Map, Value, map},
};

use super::{ScopeId, ScopeNode, ScopeTree};

/// Borrowed view of a single scope and its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    tree: &'a ScopeTree,
    node: &'a ScopeNode,
    scope: ScopeId,
    attribute_prefix: bool,
}

impl<'a> Context<'a> {
    /// Returns `None` if `scope` is not live in `tree`.
    pub(crate) fn new(tree: &'a ScopeTree, scope: ScopeId, attribute_prefix: bool) -> Option<Self> {
        let node = tree.node(scope).ok()?;
        Some(Self {
            tree,
            node,
            scope,
            attribute_prefix,
        })
    }

    /// The handle of the viewed scope.
    pub fn id(&self) -> ScopeId {
        self.scope
    }

    pub fn is_root(&self) -> bool {
        self.scope == self.tree.root()
    }

    /// Resolves `path` from this scope up through its ancestors.
    ///
    /// A leading `@` reads this scope's attributes instead, when the owning
    /// model has the prefix enabled.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        if self.attribute_prefix {
            if let Some(name) = attribute_name(path) {
                return self.attribute_path(name);
            }
        }
        let segments = path::segments(path);
        if segments.is_empty() {
            return None;
        }
        self.tree.lookup(self.scope, &segments).map(|(_, value)| value)
    }

    /// Reads an attribute of this scope by literal name.
    pub fn data(&self, name: &str) -> Option<&'a Value> {
        self.node.attributes().get(name)
    }

    /// This scope's own model data.
    pub fn model(&self) -> &'a Map {
        self.node.data()
    }

    /// The enclosing scope, or `None` at the root.
    pub fn parent(&self) -> Option<Context<'a>> {
        Self::new(self.tree, self.node.parent()?, self.attribute_prefix)
    }

    fn attribute_path(&self, name: &str) -> Option<&'a Value> {
        let segments = path::segments(name);
        let (first, rest) = segments.split_first()?;
        let attribute = self.data(first)?;
        if rest.is_empty() {
            return Some(attribute);
        }
        match attribute {
            Value::Map(inner) => map::resolve(inner, rest),
            _ => None,
        }
    }
}
