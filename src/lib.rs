//! # Worksnap
//!
//! Save/load workspace snapshots for interactive session state.
//!
//! Worksnap captures a filtered subset of a live session's named bindings
//! into a durable artifact and later restores them into a (possibly
//! different) scope - the "save workspace / load workspace" convenience of
//! interactive numerical environments.
//!
//! ## Quick Start
//!
//! ```
//! use worksnap::prelude::*;
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("demo.wssnap.tar.zst");
//!
//! // A session holds user bindings plus host-injected ones.
//! let mut session = Session::new();
//! session.bind("a", Value::Int(1));
//! session.bind("b", Value::Array(vec![Value::Int(1), Value::Int(2)]));
//! session.bind("m", Value::module("numpy")); // never persisted
//!
//! // Capture the eligible bindings into an artifact.
//! let report = session.capture(&CaptureOptions::at(&path))?;
//! assert_eq!(report.saved, vec!["a", "b"]);
//!
//! // Restore into a different session.
//! let mut other = Session::new();
//! other.restore(&path, &RestoreOptions::default())?;
//! assert_eq!(other.get("a"), Some(&Value::Int(1)));
//! # Ok::<(), worksnap::Error>(())
//! ```
//!
//! ## What gets captured
//!
//! A binding is persisted when all of the following hold:
//!
//! 1. Its name does not start with `_` (reserved for internals)
//! 2. It is not a pristine host-injected binding (hidden-set identity rule)
//! 3. Its runtime type name passes the caller's [`TypeFilter`], if any
//! 4. Its top-level structural category is not one of the fixed exclusions
//!    (modules, callables, open file handles, stack frames, type objects,
//!    generators)
//! 5. A dry-run serialization of its exact current value succeeds
//!
//! Rule 5 is empirical by design: a container holding one live value is
//! only discovered by attempting the encode, so every candidate is proven
//! persistable before inclusion and excluded (with a recorded cause) if
//! the attempt fails.
//!
//! ## Concurrency
//!
//! Capture and restore are synchronous, run-to-completion calls with no
//! internal locking. Callers invoking them concurrently against the same
//! scope must serialize those calls themselves.

#![warn(missing_docs)]

mod session;

pub mod prelude;

pub use session::Session;

// Core model
pub use worksnap_core::{Category, HostHandle, Scope, TypeFilter, Value, RESERVED_PREFIX};

// Engine entry points and reports
pub use worksnap_engine::{
    apply, capture, classify, enumerate, restore, CaptureOptions, CaptureReport,
    CategoryExclusion, Classification, Error, ExclusionReason, ProbeExclusion, RestoreOptions,
    RestoreReport, Result,
};

// Artifact surface
pub use worksnap_archive::{
    default_snapshot_path, latest_snapshot_in, probe_value, ProbeError, ReadArtifactError,
    SnapshotManifest, SnapshotReader, SnapshotVerifyInfo, SnapshotWriter, WriteArtifactError,
    SNAPSHOT_EXTENSION, SNAPSHOT_FORMAT_VERSION,
};
