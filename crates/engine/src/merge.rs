//! Restored-mapping application
//!
//! Applies a mapping read back from an artifact onto a live target scope
//! under an overwrite policy. The target is mutated in place; the mapping
//! is consumed.

use crate::report::RestoreReport;
use std::collections::BTreeMap;
use worksnap_core::{Scope, Value};

/// Apply `restored` onto `target` in the mapping's stored order.
///
/// With `overwrite` set, every name is bound unconditionally, replacing
/// any existing binding. With `overwrite` unset, names already bound in
/// the target are left untouched and reported as skipped - a conservative
/// merge, honored exactly as requested.
pub fn apply(target: &mut Scope, restored: BTreeMap<String, Value>, overwrite: bool) -> RestoreReport {
    let total = restored.len();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for (name, value) in restored {
        if !overwrite && target.contains(&name) {
            skipped.push(name);
            continue;
        }
        applied.push(name.clone());
        target.bind(name, value);
    }

    RestoreReport {
        total,
        applied,
        skipped,
    }
}
