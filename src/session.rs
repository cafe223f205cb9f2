//! Interactive session facade
//!
//! A [`Session`] models the interactive host this system serves: a user
//! scope of live bindings plus a parallel hidden scope of host-injected
//! ones. It is a convenience wrapper - the engine itself only ever sees
//! explicit [`Scope`] parameters, so synthetic scopes work identically.

use crate::{CaptureOptions, CaptureReport, RestoreOptions, RestoreReport, Result, Scope, Value};
use std::path::Path;
use std::sync::Arc;

/// A live interactive session: user bindings plus host-injected bindings.
///
/// Host-injected bindings are visible to the user but excluded from
/// capture as long as they are pristine; once the user rebinds such a
/// name, it counts as user-created and is captured like any other.
///
/// # Example
///
/// ```
/// use worksnap::{Session, Value};
///
/// let mut session = Session::new();
/// session.bind("x", Value::Int(1));
/// session.inject_hidden("_helper", Value::callable("helper"));
/// assert_eq!(session.get("x"), Some(&Value::Int(1)));
/// assert!(session.get("_helper").is_some()); // visible...
/// assert!(session.hidden().contains("_helper")); // ...but host-owned
/// ```
#[derive(Debug, Default)]
pub struct Session {
    user: Scope,
    hidden: Scope,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Session {
            user: Scope::new(),
            hidden: Scope::new(),
        }
    }

    /// Bind a user-created variable.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.user.bind(name, value);
    }

    /// Install a host-owned binding.
    ///
    /// The same allocation is bound in both the user scope and the hidden
    /// scope, which is exactly what the enumerator's identity rule keys on.
    pub fn inject_hidden(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let shared = Arc::new(value);
        self.user.bind_shared(name.clone(), shared.clone());
        self.hidden.bind_shared(name, shared);
    }

    /// The value bound to `name` in the user scope, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.user.value(name)
    }

    /// The user scope.
    pub fn scope(&self) -> &Scope {
        &self.user
    }

    /// Mutable access to the user scope.
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.user
    }

    /// The hidden (host-injected) scope.
    pub fn hidden(&self) -> &Scope {
        &self.hidden
    }

    /// Capture this session's eligible bindings into an artifact.
    ///
    /// See [`capture`](crate::capture) for the classification rules.
    pub fn capture(&self, options: &CaptureOptions) -> Result<CaptureReport> {
        crate::capture(&self.user, &self.hidden, options)
    }

    /// Restore an artifact's bindings into this session's user scope.
    ///
    /// See [`restore`](crate::restore) for the overwrite policy.
    pub fn restore(&mut self, path: &Path, options: &RestoreOptions) -> Result<RestoreReport> {
        crate::restore(&mut self.user, path, options)
    }
}
