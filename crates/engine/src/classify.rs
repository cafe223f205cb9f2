//! Two-pass serializability classification
//!
//! Pass 1 is cheap and structural: the type filter and the fixed exclusion
//! categories, checked on the top-level variant only. Pass 2 is the live
//! probe: an actual dry-run serialization of each survivor's exact current
//! value into a discard sink. Only probed survivors are accepted - static
//! type information is not trusted to predict serializability.
//!
//! Both passes build fresh lists; nothing is removed from a list while it
//! is being iterated.

use crate::report::{CategoryExclusion, ExclusionReason, ProbeExclusion};
use worksnap_archive::probe_value;
use worksnap_core::{Scope, TypeFilter};

/// Outcome of the two classification passes.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Names proven persistable, in lexicographic order
    pub accepted: Vec<String>,
    /// Names dropped by the category/type pass
    pub rejected_by_category: Vec<CategoryExclusion>,
    /// Names dropped by the live probe pass
    pub rejected_by_probe: Vec<ProbeExclusion>,
}

/// Classify `names` (looked up in `scope`) under `filter`.
///
/// A name appears in `accepted` only if a serialization attempt on its
/// exact current value succeeded. An empty filter accepts every type name.
pub fn classify(scope: &Scope, names: &[String], filter: &TypeFilter) -> Classification {
    let mut survivors = Vec::new();
    let mut rejected_by_category = Vec::new();

    for name in names {
        let value = match scope.value(name) {
            Some(value) => value,
            None => continue,
        };

        if !filter.accepts(value.type_name()) {
            rejected_by_category.push(CategoryExclusion {
                name: name.clone(),
                reason: ExclusionReason::TypeFiltered {
                    type_name: value.type_name(),
                },
            });
            continue;
        }

        if let Some(category) = value.category() {
            rejected_by_category.push(CategoryExclusion {
                name: name.clone(),
                reason: ExclusionReason::Category(category),
            });
            continue;
        }

        survivors.push(name.clone());
    }

    let mut accepted = Vec::new();
    let mut rejected_by_probe = Vec::new();

    for name in survivors {
        let value = match scope.value(&name) {
            Some(value) => value,
            None => continue,
        };
        match probe_value(value) {
            Ok(()) => accepted.push(name),
            Err(error) => rejected_by_probe.push(ProbeExclusion { name, error }),
        }
    }

    Classification {
        accepted,
        rejected_by_category,
        rejected_by_probe,
    }
}
