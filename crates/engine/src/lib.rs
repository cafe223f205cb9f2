//! Snapshot engine - capture and restore orchestration
//!
//! The engine composes four parts linearly on the capture path and in
//! reverse on the restore path:
//!
//! ```text
//! capture: enumerate → classify (category pass, probe pass) → codec write
//! restore: codec read → merge
//! ```
//!
//! Scopes are passed in explicitly by the caller; the engine has no notion
//! of where a scope comes from (a REPL, a test harness, application
//! state). Capture and restore are synchronous, run-to-completion calls
//! with no internal locking: callers sharing one scope across threads must
//! serialize those calls themselves.

pub mod capture;
pub mod classify;
pub mod enumerate;
pub mod merge;
pub mod report;

pub use capture::{capture, restore, CaptureOptions, RestoreOptions};
pub use classify::{classify, Classification};
pub use enumerate::enumerate;
pub use merge::apply;
pub use report::{
    CaptureReport, CategoryExclusion, ExclusionReason, ProbeExclusion, RestoreReport,
};

use thiserror::Error;
use worksnap_archive::{ReadArtifactError, WriteArtifactError};

/// Errors that abort a whole capture or restore call.
///
/// Per-candidate probe failures are not here: they are recovered locally,
/// recorded in the [`CaptureReport`], and never escalate.
#[derive(Debug, Error)]
pub enum Error {
    /// The artifact could not be read; nothing was applied to the target.
    #[error("failed to read snapshot artifact: {0}")]
    Read(#[from] ReadArtifactError),

    /// The artifact could not be written; the accepted set is discarded.
    #[error("failed to write snapshot artifact: {0}")]
    Write(#[from] WriteArtifactError),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
