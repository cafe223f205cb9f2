//! Capture and restore entry points
//!
//! `capture` composes enumerate → classify → codec write; `restore`
//! composes codec read → merge. Scopes are explicit parameters: the
//! engine never reaches into its caller's environment.

use crate::classify::classify;
use crate::enumerate::enumerate;
use crate::merge;
use crate::report::{CaptureReport, RestoreReport};
use crate::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use worksnap_archive::{default_snapshot_path, SnapshotReader, SnapshotWriter};
use worksnap_core::{Scope, TypeFilter};

/// Options accepted by [`capture`].
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    /// Artifact destination; synthesized from the current local time when
    /// absent.
    pub path: Option<PathBuf>,
    /// Runtime type names to retain; unrestricted by default.
    pub type_filter: TypeFilter,
    /// Promote the full candidate and rejection listings to info-level
    /// logs. Observability only; never affects what is captured.
    pub debug: bool,
}

impl CaptureOptions {
    /// Options with an explicit artifact destination.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        CaptureOptions {
            path: Some(path.into()),
            ..CaptureOptions::default()
        }
    }
}

/// Options accepted by [`restore`].
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    /// Replace existing bindings in the target scope. When unset, names
    /// already bound are skipped and reported, never overwritten.
    pub overwrite: bool,
    /// Promote restore listings to info-level logs.
    pub debug: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        RestoreOptions {
            overwrite: true,
            debug: false,
        }
    }
}

/// Capture the eligible bindings of `scope` into a durable artifact.
///
/// Bindings are enumerated (excluding reserved names and pristine entries
/// of `hidden`), classified by the category pass and the live probe pass,
/// and the accepted set is written as one complete artifact. Per-candidate
/// probe failures only exclude that candidate; the call fails only if the
/// artifact itself cannot be written.
///
/// Accepting zero bindings is a success: a valid empty artifact is written
/// and the report says so.
pub fn capture(scope: &Scope, hidden: &Scope, options: &CaptureOptions) -> Result<CaptureReport> {
    let names = enumerate(scope, hidden);
    let candidates = names.len();
    if options.debug {
        info!(?names, "candidate bindings");
    } else {
        debug!(?names, "candidate bindings");
    }

    let classification = classify(scope, &names, &options.type_filter);
    for excluded in &classification.rejected_by_category {
        if options.debug {
            info!(name = %excluded.name, reason = ?excluded.reason, "excluded by category pass");
        } else {
            debug!(name = %excluded.name, reason = ?excluded.reason, "excluded by category pass");
        }
    }
    for excluded in &classification.rejected_by_probe {
        warn!(name = %excluded.name, error = %excluded.error, "binding will not be saved");
    }
    if options.debug {
        info!(accepted = ?classification.accepted, "bindings to save");
    } else {
        debug!(accepted = ?classification.accepted, "bindings to save");
    }

    let mut accepted = BTreeMap::new();
    for name in &classification.accepted {
        if let Some(value) = scope.value(name) {
            accepted.insert(name.clone(), value.clone());
        }
    }

    let path = options.path.clone().unwrap_or_else(default_snapshot_path);
    let write_info = SnapshotWriter::new().write(&accepted, &path)?;

    info!(
        path = %write_info.path.display(),
        saved = write_info.binding_count,
        candidates,
        "workspace saved"
    );

    Ok(CaptureReport {
        path: write_info.path,
        candidates,
        excluded_by_category: classification.rejected_by_category,
        excluded_by_probe: classification.rejected_by_probe,
        saved: classification.accepted,
    })
}

/// Restore an artifact's bindings into `target` under the overwrite policy.
///
/// The artifact is read and validated as a whole before anything is
/// applied: a read failure means the target was not touched.
pub fn restore(target: &mut Scope, path: &Path, options: &RestoreOptions) -> Result<RestoreReport> {
    let restored = SnapshotReader::read(path)?;
    if options.debug {
        info!(path = %path.display(), bindings = restored.len(), "artifact read");
    } else {
        debug!(path = %path.display(), bindings = restored.len(), "artifact read");
    }

    let report = merge::apply(target, restored, options.overwrite);
    info!(
        applied = report.applied_count(),
        skipped = report.skipped_count(),
        "workspace restored"
    );
    Ok(report)
}
