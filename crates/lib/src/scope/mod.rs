//! The scope tree: an arena of nested lexical scopes.
//!
//! Each [`ScopeNode`] owns its model data and its attribute data and points at
//! its parent through a [`ScopeId`] handle. Handles are allocated from a
//! monotonic counter and never reused, so a handle to a destroyed scope stays
//! invalid forever instead of silently naming a newer scope.
//!
//! Nodes do not know their children. The tree is only ever grown from, and
//! shrunk at, whichever node the caller treats as current; see
//! [`ContentModel`](crate::ContentModel).

use std::{collections::HashMap, fmt};

use crate::value::{Map, Value, map};

pub mod context;
pub mod errors;

pub use context::Context;
pub use errors::ScopeError;

/// Stable handle to a node in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    /// The raw handle value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// One lexical scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeNode {
    parent: Option<ScopeId>,
    data: Map,
    attributes: Map,
}

impl ScopeNode {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Model data visible to lookups and views.
    pub fn data(&self) -> &Map {
        &self.data
    }

    /// Attribute data, never part of any view.
    pub fn attributes(&self) -> &Map {
        &self.attributes
    }
}

/// A location of a nested map: a scope plus the segments leading to the map
/// inside that scope's model data. Empty `path` means the data map itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub scope: ScopeId,
    pub path: Vec<String>,
}

impl Location {
    /// The top of `scope`'s model data.
    pub fn top(scope: ScopeId) -> Self {
        Self {
            scope,
            path: Vec::new(),
        }
    }
}

/// Arena of scope nodes with a single, permanent root.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    nodes: HashMap<ScopeId, ScopeNode>,
    root: ScopeId,
    next_id: u64,
}

impl ScopeTree {
    /// Creates a tree holding only a root scope with `root_data` as its model.
    pub fn new(root_data: Map) -> Self {
        let root = ScopeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            ScopeNode {
                parent: None,
                data: root_data,
                attributes: Map::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// Returns true if `id` names a live scope.
    pub fn contains(&self, id: ScopeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live scopes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ScopeId) -> Result<&ScopeNode, ScopeError> {
        self.nodes.get(&id).ok_or(ScopeError::UnknownScope { id })
    }

    fn node_mut(&mut self, id: ScopeId) -> Result<&mut ScopeNode, ScopeError> {
        self.nodes.get_mut(&id).ok_or(ScopeError::UnknownScope { id })
    }

    /// The parent of `id`; `None` for the root.
    pub fn parent(&self, id: ScopeId) -> Result<Option<ScopeId>, ScopeError> {
        Ok(self.node(id)?.parent)
    }

    /// Creates an empty child scope of `parent` and returns its handle.
    pub fn create_child(&mut self, parent: ScopeId) -> Result<ScopeId, ScopeError> {
        self.node(parent)?;
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            ScopeNode {
                parent: Some(parent),
                data: Map::new(),
                attributes: Map::new(),
            },
        );
        Ok(id)
    }

    /// Destroys `id`, returning the released node.
    ///
    /// Children of `id`, if the caller created any, are left dangling; the
    /// model only ever destroys its innermost scope.
    pub fn destroy(&mut self, id: ScopeId) -> Result<ScopeNode, ScopeError> {
        if id == self.root {
            return Err(ScopeError::RootImmutable);
        }
        self.nodes.remove(&id).ok_or(ScopeError::UnknownScope { id })
    }

    pub fn data(&self, id: ScopeId) -> Result<&Map, ScopeError> {
        Ok(&self.node(id)?.data)
    }

    pub fn data_mut(&mut self, id: ScopeId) -> Result<&mut Map, ScopeError> {
        Ok(&mut self.node_mut(id)?.data)
    }

    pub fn attributes(&self, id: ScopeId) -> Result<&Map, ScopeError> {
        Ok(&self.node(id)?.attributes)
    }

    pub fn attributes_mut(&mut self, id: ScopeId) -> Result<&mut Map, ScopeError> {
        Ok(&mut self.node_mut(id)?.attributes)
    }

    /// Iterates from `id` up to the root, `id` first.
    ///
    /// Iteration stops early if a parent link is dangling.
    pub fn ancestry(&self, id: ScopeId) -> Ancestry<'_> {
        Ancestry {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Number of parent hops from `id` to the root.
    pub fn depth(&self, id: ScopeId) -> Result<usize, ScopeError> {
        self.node(id)?;
        Ok(self.ancestry(id).count() - 1)
    }

    /// Scope-chain lookup.
    ///
    /// Resolves `segments` structurally in `from`'s data, then in each ancestor
    /// in turn, root last. Returns the first non-null value found and the scope
    /// holding it; a stored `Null` counts as unresolved and the climb goes on.
    pub fn lookup<S: AsRef<str>>(&self, from: ScopeId, segments: &[S]) -> Option<(ScopeId, &Value)> {
        self.ancestry(from).find_map(|(id, node)| {
            map::resolve(&node.data, segments)
                .filter(|value| !value.is_null())
                .map(|value| (id, value))
        })
    }

    /// Mutable access to the map at `location`.
    pub fn container_mut(&mut self, location: &Location) -> Result<&mut Map, ScopeError> {
        let data = self.data_mut(location.scope)?;
        map::container_mut(data, &location.path).ok_or_else(|| ScopeError::MissingContainer {
            scope: location.scope,
            path: location.path.join("."),
        })
    }
}

/// Iterator over a scope and its ancestors; see [`ScopeTree::ancestry`].
pub struct Ancestry<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = (ScopeId, &'a ScopeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.nodes.get(&id)?;
        self.next = node.parent;
        Some((id, node))
    }
}
