//! Capture and restore reports
//!
//! The observability counterpart of the engine: every capture and restore
//! returns a report that accounts for each candidate - considered,
//! excluded (and why), persisted, applied, or skipped.

use std::path::PathBuf;
use worksnap_archive::ProbeError;
use worksnap_core::Category;

/// Why a candidate was dropped in the category/type pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// The runtime type name is not in the caller's type filter.
    TypeFiltered {
        /// The candidate's runtime type name
        type_name: &'static str,
    },
    /// The top-level structural category is never persistable.
    Category(Category),
}

/// A candidate dropped by the category/type pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExclusion {
    /// Candidate name
    pub name: String,
    /// Why it was dropped
    pub reason: ExclusionReason,
}

/// A candidate dropped by the live probe pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeExclusion {
    /// Candidate name
    pub name: String,
    /// The recorded serialization failure
    pub error: ProbeError,
}

/// Outcome of a successful capture.
///
/// A capture that persisted zero bindings is still a success; failure is
/// only ever an [`Error`](crate::Error).
#[derive(Debug, Clone)]
pub struct CaptureReport {
    /// Where the artifact was written
    pub path: PathBuf,
    /// Total candidates considered after enumeration
    pub candidates: usize,
    /// Candidates dropped by the category/type pass
    pub excluded_by_category: Vec<CategoryExclusion>,
    /// Candidates dropped by the live probe pass
    pub excluded_by_probe: Vec<ProbeExclusion>,
    /// Names persisted, in lexicographic order
    pub saved: Vec<String>,
}

impl CaptureReport {
    /// Number of bindings persisted.
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }
}

/// Outcome of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// Total bindings in the artifact
    pub total: usize,
    /// Names bound into the target scope, in stored order
    pub applied: Vec<String>,
    /// Names skipped because the target already bound them
    pub skipped: Vec<String>,
}

impl RestoreReport {
    /// Number of bindings applied.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Number of bindings skipped due to existing-name conflicts.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
