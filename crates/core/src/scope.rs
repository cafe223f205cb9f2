//! Scopes: name→value binding tables
//!
//! A [`Scope`] represents a live environment at a point of execution — the
//! source scope at capture time or the target scope at restore time. Values
//! are held behind `Arc` so reference identity is observable: a host can
//! install the same allocation into both the user scope and the hidden
//! scope, and the enumerator can tell a pristine host-injected binding
//! apart from one the user has since rebound.

use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Names starting with this prefix are internal/transient and never
/// candidates for capture.
pub const RESERVED_PREFIX: char = '_';

/// A name→value binding table.
///
/// Names are unique within a scope. Iteration order is lexicographic,
/// which is what makes artifacts and diagnostics deterministic.
///
/// # Example
///
/// ```
/// use worksnap_core::{Scope, Value};
///
/// let mut scope = Scope::new();
/// scope.bind("a", Value::Int(1));
/// scope.bind("b", Value::from("two"));
/// assert_eq!(scope.len(), 2);
/// assert_eq!(scope.value("a"), Some(&Value::Int(1)));
/// ```
#[derive(Debug, Default)]
pub struct Scope {
    bindings: BTreeMap<String, Arc<Value>>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Scope {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing any existing binding.
    ///
    /// The value gets a fresh allocation; use [`Scope::bind_shared`] to
    /// install an allocation shared with another scope.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), Arc::new(value));
    }

    /// Bind `name` to an existing shared allocation.
    ///
    /// This is how a host injects the same object into both the user scope
    /// and the hidden scope.
    pub fn bind_shared(&mut self, name: impl Into<String>, value: Arc<Value>) {
        self.bindings.insert(name.into(), value);
    }

    /// The shared binding for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Arc<Value>> {
        self.bindings.get(name)
    }

    /// The value bound to `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).map(|v| &**v)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Remove the binding for `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Arc<Value>> {
        self.bindings.remove(name)
    }

    /// Bound names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|k| k.as_str())
    }

    /// (name, binding) pairs in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Value>)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the scope has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
