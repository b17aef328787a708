//! The content model: scope tree, cursor, attributes and JSON views.
//!
//! [`ContentModel`] is the type renderers and context processors talk to. It
//! owns a [`ScopeTree`], a cursor naming the current scope and a cache of the
//! last rendered JSON text, all behind one lock so a scope push/pop, a write
//! and a flatten are atomic relative to each other.
//!
//! # Placement
//!
//! Writes go through [`ContentModel::set_with`] and one of three
//! [`Locality`] policies:
//!
//! - [`Locality::Closest`] and [`Locality::Root`] use *ancestor probing*:
//!   every intermediate segment of the path is looked up through the whole
//!   scope chain. An existing map is descended into wherever it lives, a
//!   missing or non-map value is replaced with a fresh map in the map being
//!   written. The walk starts at the current scope's data (Closest) or at the
//!   root's data (Root).
//! - [`Locality::Isolated`] builds a new nested structure for the full path
//!   and merges it into the current scope's top level, overwriting colliding
//!   keys.
//!
//! **Shared structure hazard:** because probing descends into maps found in
//! *other* scopes, a Closest write in a child scope can land inside a map owned
//! by an ancestor, and it survives [`ContentModel::retract_scope`]. Use
//! [`Locality::Isolated`] when a write must stay local.
//!
//! # Example
//!
//! ```
//! use scoped_model::{ContentModel, Locality};
//!
//! let model = ContentModel::new();
//! model.set("lists.GoT.Starks.killed", "Eddard")?;
//! assert_eq!(model.get("lists.GoT.Starks.killed").unwrap(), "Eddard");
//!
//! model.extend_scope()?;
//! model.set_with("user.name", "Bran", Locality::Isolated)?;
//! assert!(model.has("user.name"));
//! model.retract_scope();
//! assert!(!model.has("user.name"));
//! # Ok::<(), scoped_model::Error>(())
//! ```

use std::{
    fmt,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::Serialize;
use tracing::{debug, error, trace};

use crate::{
    Result,
    adapter::adapt,
    config::{Locality, ModelConfig},
    constants::BLANK,
    path::{self, ModelPath, PathError, attribute_name},
    scope::{Context, Location, ScopeError, ScopeId, ScopeTree},
    value::{Map, Value, ValueError, ValueKind, map, map_from_json, map_to_json, merge_keep_existing, merge_overwrite},
};

pub mod cache;
mod guard;

pub use cache::CacheStats;
pub use guard::ScopeGuard;

use cache::JsonCache;

/// Hierarchical, scope-aware content model.
///
/// All methods take `&self`; the model is `Send + Sync` and can be shared
/// between threads behind an `Arc`.
#[derive(Debug)]
pub struct ContentModel {
    state: RwLock<ModelState>,
    config: ModelConfig,
}

/// Everything mutable, guarded as one unit.
#[derive(Debug)]
struct ModelState {
    tree: ScopeTree,
    current: ScopeId,
    cache: JsonCache,
}

impl Default for ContentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentModel {
    /// Creates a model with an empty root scope and the default config.
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default(), Map::new())
    }

    /// Creates a model whose root scope holds `data`.
    pub fn with_data(data: Map) -> Self {
        Self::with_config(ModelConfig::default(), data)
    }

    /// Creates a model with an explicit configuration.
    pub fn with_config(config: ModelConfig, data: Map) -> Self {
        let tree = ScopeTree::new(data);
        let current = tree.root();
        Self {
            state: RwLock::new(ModelState {
                tree,
                current,
                cache: JsonCache::default(),
            }),
            config,
        }
    }

    /// Creates a model whose root data is adapted from `object`.
    ///
    /// # Errors
    /// Returns a [`ValueError`] if `object` cannot be adapted into a map.
    pub fn from_object<T>(object: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        Ok(Self::with_data(adapt(object)?))
    }

    /// Creates a model whose root data is the given JSON object.
    ///
    /// # Errors
    /// Returns [`ValueError::NotAnObject`] for anything but a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(object) => Ok(Self::with_data(map_from_json(object))),
            other => Err(ValueError::NotAnObject {
                kind: Value::from(other).kind().to_string(),
            }
            .into()),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, ModelState> {
        // Every critical section leaves the state consistent before it can
        // panic, so a poisoned lock is still safe to use.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ModelState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Lookups =====

    /// Looks up `path`, reporting invalid paths as errors.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidPath`] if `path` has no segments.
    pub fn try_get(&self, path: &str) -> Result<Option<Value>> {
        let lookup = match attribute_name(path) {
            Some(name) if self.config.attribute_prefix => name,
            _ => path,
        };
        if path::segments(lookup).is_empty() {
            return Err(PathError::InvalidPath {
                path: path.to_string(),
            }
            .into());
        }
        let state = self.read();
        Ok(state.resolve(path, self.config.attribute_prefix).cloned())
    }

    /// Looks up `path` from the current scope up to the root.
    ///
    /// The first scope in which the full path resolves to a non-null value
    /// wins; a stored `Null` lets the search continue outward. Paths starting
    /// with `@` read the current scope's attributes. Invalid paths yield
    /// `None`.
    pub fn get(&self, path: &str) -> Option<Value> {
        match self.try_get(path) {
            Ok(value) => value,
            Err(err) => {
                debug!(path, error = %err, "Rejected lookup");
                None
            }
        }
    }

    /// Returns true if `path` resolves to a non-null value.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| !value.is_null())
    }

    /// Returns true if `path` resolves to a non-null value of an accepted kind.
    pub fn is(&self, path: &str, kind: ValueKind) -> bool {
        self.get_typed(path, kind).is_some()
    }

    /// The value at `path` if [`is`](Self::is) holds for `kind`.
    pub fn get_typed(&self, path: &str, kind: ValueKind) -> Option<Value> {
        self.get(path)
            .filter(|value| !value.is_null() && kind.accepts(value.kind()))
    }

    /// The value at `path` converted to `T`; `None` if absent or of another type.
    ///
    /// ```
    /// # use scoped_model::ContentModel;
    /// let model = ContentModel::new();
    /// model.set("age", 30)?;
    /// assert_eq!(model.get_as::<i64>("age"), Some(30));
    /// assert_eq!(model.get_as::<String>("age"), None);
    /// # Ok::<(), scoped_model::Error>(())
    /// ```
    pub fn get_as<T>(&self, path: &str) -> Option<T>
    where
        T: for<'v> TryFrom<&'v Value>,
    {
        let value = self.get(path)?;
        T::try_from(&value).ok()
    }

    /// String form of the value at `path`, or an empty string.
    pub fn get_as_string(&self, path: &str) -> String {
        match self.get(path) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => BLANK.to_string(),
        }
    }

    // ===== Attributes =====

    /// Sets an attribute on the current scope.
    ///
    /// Attributes never appear in [`to_view`](Self::to_view) or the JSON text
    /// and are destroyed together with their scope.
    pub fn set_attribute(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let mut state = self.write();
        let current = state.current;
        state
            .tree
            .attributes_mut(current)?
            .insert(name.to_string(), value.into());
        trace!(name, scope = %current, "Set attribute");
        Ok(())
    }

    /// Reads an attribute of the current scope by literal name.
    pub fn get_attribute(&self, name: &str) -> Option<Value> {
        let state = self.read();
        state.tree.attributes(state.current).ok()?.get(name).cloned()
    }

    // ===== Writes =====

    /// Sets `path` to `value` using the configured default locality.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.set_with(path, value, self.config.default_locality)
    }

    /// Sets `path` to `value` in the current scope only.
    pub fn set_isolated(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.set_with(path, value, Locality::Isolated)
    }

    /// Sets `path` to `value` using the given placement policy.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidPath`] if `path` has no segments.
    pub fn set_with(&self, path: &str, value: impl Into<Value>, locality: Locality) -> Result<()> {
        let path = ModelPath::parse(path)?;
        let value = value.into();
        let mut state = self.write();
        debug!(path = %path, ?locality, scope = %state.current, "Setting value");
        state.place(&path, value, locality)?;
        Ok(())
    }

    /// Sets `path` to a foreign object adapted into a map.
    ///
    /// # Errors
    /// Adapter failures propagate as [`ValueError`]s; nothing is written.
    pub fn set_object<T>(&self, path: &str, object: &T, locality: Locality) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let adapted = adapt(object)?;
        self.set_with(path, Value::Map(adapted), locality)
    }

    // ===== Scopes =====

    /// Pushes a new empty scope under the current one and makes it current.
    pub fn extend_scope(&self) -> Result<ScopeId> {
        let mut state = self.write();
        let parent = state.current;
        let child = state.tree.create_child(parent)?;
        state.current = child;
        state.cache.invalidate();
        debug!(scope = %child, parent = %parent, "Extended scope");
        Ok(child)
    }

    /// Destroys the current scope and moves back to its parent.
    ///
    /// At the root this is a no-op. Returns whether a scope was destroyed.
    pub fn retract_scope(&self) -> bool {
        self.write().retract()
    }

    /// Extends the scope and retracts it again when the guard drops.
    ///
    /// ```
    /// # use scoped_model::ContentModel;
    /// let model = ContentModel::new();
    /// {
    ///     let scope = model.scope()?;
    ///     scope.set_isolated("tmp", 1)?;
    ///     assert!(model.has("tmp"));
    /// }
    /// assert!(!model.has("tmp"));
    /// # Ok::<(), scoped_model::Error>(())
    /// ```
    pub fn scope(&self) -> Result<ScopeGuard<'_>> {
        let id = self.extend_scope()?;
        Ok(ScopeGuard::new(self, id))
    }

    /// Retracts only if `id` is still the current scope.
    pub(crate) fn retract_if_current(&self, id: ScopeId) -> bool {
        let mut state = self.write();
        if state.current != id {
            trace!(scope = %id, current = %state.current, "Guarded scope is not current");
            return false;
        }
        state.retract()
    }

    pub fn current_scope(&self) -> ScopeId {
        self.read().current
    }

    pub fn root_scope(&self) -> ScopeId {
        self.read().tree.root()
    }

    /// Number of scopes between the current one and the root.
    pub fn depth(&self) -> usize {
        let state = self.read();
        state.tree.ancestry(state.current).count().saturating_sub(1)
    }

    /// Runs `f` with a read-only [`Context`] of the current scope.
    ///
    /// This is the handle a templating engine walks during rendering.
    pub fn with_context<R>(&self, f: impl FnOnce(Context<'_>) -> R) -> Result<R> {
        let state = self.read();
        let ctx = state.context(state.current, self.config.attribute_prefix)?;
        Ok(f(ctx))
    }

    /// Runs `f` with a read-only [`Context`] of the root scope.
    pub fn with_root_context<R>(&self, f: impl FnOnce(Context<'_>) -> R) -> Result<R> {
        let state = self.read();
        let ctx = state.context(state.tree.root(), self.config.attribute_prefix)?;
        Ok(f(ctx))
    }

    // ===== Views =====

    /// Map of the listed keys resolved via [`get`](Self::get).
    ///
    /// Keys that are absent or null are omitted.
    pub fn to_flat_view<I, S>(&self, keys: I) -> Map
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let value = self.get(key.as_ref()).filter(|v| !v.is_null())?;
                Some((key.as_ref().to_string(), value))
            })
            .collect()
    }

    /// Flattened snapshot of the current scope and its ancestors.
    ///
    /// Nearer scopes shadow farther ones key by key at the top level.
    /// Attributes are never included.
    pub fn to_view(&self) -> Map {
        self.read().flatten()
    }

    /// [`to_view`](Self::to_view) as a JSON object.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(map_to_json(&self.to_view()))
    }

    /// JSON text of [`to_view`](Self::to_view), served from the cache while
    /// no mutation has happened since it was rendered.
    pub fn to_json_text(&self) -> Result<String> {
        let mut state = self.write();
        if let Some(text) = state.cache.lookup() {
            return Ok(text.to_string());
        }
        let view = state.flatten();
        let text = if self.config.pretty_json {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        state.cache.store(text.clone());
        Ok(text)
    }

    /// Returns true if the next [`to_json_text`](Self::to_json_text) is a cache hit.
    pub fn is_json_cached(&self) -> bool {
        self.read().cache.is_valid()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.read().cache.stats()
    }
}

impl fmt::Display for ContentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json_text().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl ModelState {
    fn context(
        &self,
        id: ScopeId,
        attribute_prefix: bool,
    ) -> std::result::Result<Context<'_>, ScopeError> {
        Context::new(&self.tree, id, attribute_prefix).ok_or(ScopeError::UnknownScope { id })
    }

    fn resolve(&self, path: &str, attribute_prefix: bool) -> Option<&Value> {
        self.context(self.current, attribute_prefix).ok()?.get(path)
    }

    fn flatten(&self) -> Map {
        let mut chain = self.tree.ancestry(self.current);
        let mut view = chain
            .next()
            .map(|(_, node)| node.data().clone())
            .unwrap_or_default();
        for (_, node) in chain {
            merge_keep_existing(&mut view, node.data());
        }
        view
    }

    fn retract(&mut self) -> bool {
        let scope = self.current;
        let destroyed = match self.tree.parent(scope) {
            Ok(Some(parent)) => match self.tree.destroy(scope) {
                Ok(_) => {
                    self.current = parent;
                    debug!(scope = %scope, current = %parent, "Retracted scope");
                    true
                }
                Err(err) => {
                    error!(scope = %scope, error = %err, "Failed to destroy scope");
                    false
                }
            },
            Ok(None) => {
                trace!("Retract at root ignored");
                false
            }
            Err(err) => {
                error!(scope = %scope, error = %err, "Current scope is not live");
                false
            }
        };
        self.cache.invalidate();
        destroyed
    }

    fn place(
        &mut self,
        path: &ModelPath,
        value: Value,
        locality: Locality,
    ) -> std::result::Result<(), ScopeError> {
        let result = match locality {
            Locality::Root => self.probe_and_store(self.tree.root(), path, value),
            Locality::Closest => self.probe_and_store(self.current, path, value),
            Locality::Isolated => {
                let isolated = map::nest(path.segments(), value);
                self.tree
                    .data_mut(self.current)
                    .map(|data| merge_overwrite(data, isolated))
            }
        };
        self.cache.invalidate();
        result
    }

    /// Ancestor probing rooted at `target`'s model data.
    fn probe_and_store(
        &mut self,
        target: ScopeId,
        path: &ModelPath,
        value: Value,
    ) -> std::result::Result<(), ScopeError> {
        let mut working = Location::top(target);
        for (index, segment) in path.ancestors().iter().enumerate() {
            let prefix = path.prefix(index);
            let found = self
                .tree
                .lookup(self.current, prefix)
                .map(|(scope, existing)| (scope, existing.is_map()));
            match found {
                Some((scope, true)) => {
                    if scope != working.scope {
                        trace!(prefix = %prefix.join("."), from = %scope, "Descending into map of another scope");
                    }
                    working = Location {
                        scope,
                        path: prefix.to_vec(),
                    };
                }
                other => {
                    trace!(segment = %segment, replaced = other.is_some(), "Creating intermediate map");
                    self.tree
                        .container_mut(&working)?
                        .insert(segment.clone(), Value::Map(Map::new()));
                    working.path.push(segment.clone());
                }
            }
        }
        self.tree
            .container_mut(&working)?
            .insert(path.leaf().to_string(), value);
        Ok(())
    }
}
