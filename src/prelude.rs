//! Convenient imports for Worksnap.
//!
//! This module re-exports the most commonly used types so you can get
//! started with a single import:
//!
//! ```
//! use worksnap::prelude::*;
//!
//! let mut session = Session::new();
//! session.bind("x", Value::Int(1));
//! ```

// Main entry point
pub use crate::session::Session;

// Error handling
pub use crate::{Error, Result};

// Engine surface
pub use crate::{capture, restore, CaptureOptions, CaptureReport, RestoreOptions, RestoreReport};

// Core types
pub use crate::{Scope, TypeFilter, Value};

// Artifact helpers
pub use crate::{latest_snapshot_in, SnapshotReader, SnapshotWriter};
