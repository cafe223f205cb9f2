//! Snapshot artifacts - durable workspace state
//!
//! This crate implements the durable artifact a capture produces and a
//! restore consumes, plus the dry-run serialization probe the classifier
//! uses to prove a value persistable before it is admitted.
//!
//! ## Artifact Format
//!
//! Snapshots use the `.wssnap.tar.zst` format - a zstd-compressed tar
//! archive:
//!
//! ```text
//! <name>.wssnap.tar.zst
//! └── snapshot/
//!     ├── MANIFEST.json    # Format version, snapshot id, checksums
//!     └── BINDINGS.snap    # MessagePack-encoded name→value mapping
//! ```
//!
//! ## Design Principles
//!
//! - **All-or-nothing**: a read either yields the complete mapping or an
//!   error; a corrupt artifact never yields a partial mapping
//! - **Self-describing**: the manifest makes a zero-binding artifact
//!   distinguishable from a file that is not an artifact at all
//! - **Immutable**: an artifact is written in one call and never updated
//! - **Inspectable**: standard tools (tar, jq) can inspect contents

mod error;
mod probe;
mod reader;
mod types;
mod writer;

pub use error::{ReadArtifactError, WriteArtifactError};
pub use probe::{probe_value, ProbeError};
pub use reader::{latest_snapshot_in, SnapshotReader};
pub use types::{
    default_snapshot_path, default_snapshot_path_at, paths, xxh3_hex, SnapshotManifest,
    SnapshotVerifyInfo, SnapshotWriteInfo, DEFAULT_NAME_PREFIX, SNAPSHOT_EXTENSION,
    SNAPSHOT_FORMAT_VERSION,
};
pub use writer::SnapshotWriter;
