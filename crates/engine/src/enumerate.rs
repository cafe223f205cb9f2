//! Candidate binding enumeration
//!
//! Lists the names in a source scope that are candidates for capture,
//! excluding reserved names and pristine host-injected bindings. Pure
//! read; no side effects.

use std::sync::Arc;
use worksnap_core::{Scope, RESERVED_PREFIX};

/// List candidate binding names from `scope` in lexicographic order.
///
/// A name is excluded when it starts with the reserved prefix, or when the
/// hidden set binds the same name to the very same allocation (a pristine
/// host-injected binding). Identity is what matters: a hidden name the
/// user has since rebound points at a different allocation and is treated
/// as user-created, even if the values compare equal.
pub fn enumerate(scope: &Scope, hidden: &Scope) -> Vec<String> {
    scope
        .iter()
        .filter(|(name, _)| !name.starts_with(RESERVED_PREFIX))
        .filter(|(name, value)| match hidden.get(name) {
            Some(injected) => !Arc::ptr_eq(value, injected),
            None => true,
        })
        .map(|(name, _)| name.to_string())
        .collect()
}
