//! Snapshot artifact types and format constants

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Current artifact format version.
///
/// Readers reject artifacts with any other version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// File extension identifying snapshot artifacts (without leading dot).
pub const SNAPSHOT_EXTENSION: &str = "wssnap.tar.zst";

/// Literal prefix used when synthesizing a default artifact name.
pub const DEFAULT_NAME_PREFIX: &str = "workspace_";

/// Member paths inside the tar archive.
pub mod paths {
    /// Root directory inside the archive.
    pub const ROOT: &str = "snapshot";
    /// Manifest member name.
    pub const MANIFEST_NAME: &str = "MANIFEST.json";
    /// Bindings payload member name.
    pub const BINDINGS_NAME: &str = "BINDINGS.snap";
    /// Full manifest member path.
    pub const MANIFEST: &str = "snapshot/MANIFEST.json";
    /// Full bindings payload member path.
    pub const BINDINGS: &str = "snapshot/BINDINGS.snap";
}

/// Manifest stored alongside the bindings payload.
///
/// The manifest is what makes an artifact self-describing: a reader can
/// reject a non-artifact file, an unsupported version, or a tampered
/// payload before decoding a single binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// Artifact format version
    pub format_version: u32,
    /// Unique id assigned at write time
    pub snapshot_id: Uuid,
    /// Write timestamp (UTC)
    pub created_at: DateTime<Utc>,
    /// Number of bindings in the payload
    pub binding_count: usize,
    /// xxh3 hex digests keyed by archive member name
    pub checksums: BTreeMap<String, String>,
}

/// Summary returned by a successful write.
#[derive(Debug, Clone)]
pub struct SnapshotWriteInfo {
    /// Where the artifact was written
    pub path: PathBuf,
    /// Number of bindings written
    pub binding_count: usize,
    /// Id assigned to this artifact
    pub snapshot_id: Uuid,
}

/// Summary returned by [`SnapshotReader::validate`](crate::SnapshotReader::validate).
#[derive(Debug, Clone)]
pub struct SnapshotVerifyInfo {
    /// Id recorded in the manifest
    pub snapshot_id: Uuid,
    /// Format version recorded in the manifest
    pub format_version: u32,
    /// Binding count recorded in the manifest
    pub binding_count: usize,
    /// Whether the payload checksum matched the manifest
    pub checksums_valid: bool,
}

/// xxh3 digest rendered as fixed-width hex.
pub fn xxh3_hex(data: &[u8]) -> String {
    format!("{:016x}", xxhash_rust::xxh3::xxh3_64(data))
}

/// Synthesize the default artifact path for a given local time.
///
/// The pattern is a literal prefix, the timestamp with `-`, `:` and `.`
/// replaced by `_` and the sub-second fraction truncated to centiseconds,
/// and the artifact extension:
/// `workspace_2026_08_07_14_53_19_12.wssnap.tar.zst`.
pub fn default_snapshot_path_at(now: DateTime<Local>) -> PathBuf {
    let stamp = now.format("%Y-%m-%d_%H:%M:%S%.3f").to_string();
    // chrono has no centisecond code; format millis and drop the last digit.
    let stamp = stamp[..stamp.len() - 1].replace(['-', ':', '.'], "_");
    PathBuf::from(format!("{}{}.{}", DEFAULT_NAME_PREFIX, stamp, SNAPSHOT_EXTENSION))
}

/// Synthesize the default artifact path for the current local time.
pub fn default_snapshot_path() -> PathBuf {
    default_snapshot_path_at(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_path_pattern() {
        let now = Local.with_ymd_and_hms(2026, 8, 7, 14, 53, 19).unwrap()
            + chrono::Duration::milliseconds(128);
        let path = default_snapshot_path_at(now);
        assert_eq!(
            path,
            PathBuf::from("workspace_2026_08_07_14_53_19_12.wssnap.tar.zst")
        );
    }

    #[test]
    fn test_default_path_has_no_separator_noise() {
        let path = default_snapshot_path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with(DEFAULT_NAME_PREFIX));
        assert!(name.ends_with(SNAPSHOT_EXTENSION));
        let stem = name
            .trim_start_matches(DEFAULT_NAME_PREFIX)
            .trim_end_matches(SNAPSHOT_EXTENSION);
        assert!(!stem.contains('-'));
        assert!(!stem.contains(':'));
        assert!(!stem.contains(' '));
    }

    #[test]
    fn test_xxh3_hex_is_stable() {
        let a = xxh3_hex(b"hello");
        let b = xxh3_hex(b"hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_ne!(a, xxh3_hex(b"world"));
    }
}
