//! Snapshot artifact writer
//!
//! Builds `.wssnap.tar.zst` artifacts: a MessagePack bindings payload plus
//! a JSON manifest, tarred and zstd-compressed. The whole artifact is
//! assembled in memory and written to the target path in one call; on any
//! failure the call errors and the file handle is released.

use crate::error::WriteArtifactError;
use crate::types::{
    paths, xxh3_hex, SnapshotManifest, SnapshotWriteInfo, SNAPSHOT_FORMAT_VERSION,
};
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;
use worksnap_core::Value;

/// Writer for snapshot artifacts.
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Create a writer.
    pub fn new() -> Self {
        SnapshotWriter
    }

    /// Serialize `bindings` as a complete artifact at `path`.
    ///
    /// The mapping is written as a single unit; there is no partial or
    /// streaming write. Iteration order of the mapping (lexicographic by
    /// name) is the stored order.
    pub fn write(
        &self,
        bindings: &BTreeMap<String, Value>,
        path: &Path,
    ) -> Result<SnapshotWriteInfo, WriteArtifactError> {
        let (data, manifest) = self.write_to_vec(bindings)?;

        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        out.write_all(&data)?;
        out.flush()?;

        debug!(
            path = %path.display(),
            bindings = manifest.binding_count,
            snapshot_id = %manifest.snapshot_id,
            "snapshot artifact written"
        );

        Ok(SnapshotWriteInfo {
            path: path.to_path_buf(),
            binding_count: manifest.binding_count,
            snapshot_id: manifest.snapshot_id,
        })
    }

    /// Serialize `bindings` to an in-memory artifact.
    ///
    /// Returns the compressed bytes and the manifest they embed.
    pub fn write_to_vec(
        &self,
        bindings: &BTreeMap<String, Value>,
    ) -> Result<(Vec<u8>, SnapshotManifest), WriteArtifactError> {
        let payload = rmp_serde::to_vec_named(bindings)?;

        let mut checksums = BTreeMap::new();
        checksums.insert(paths::BINDINGS_NAME.to_string(), xxh3_hex(&payload));

        let manifest = SnapshotManifest {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot_id: Uuid::new_v4(),
            created_at: Utc::now(),
            binding_count: bindings.len(),
            checksums,
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;

        let mut builder = tar::Builder::new(Vec::new());
        append_member(&mut builder, paths::MANIFEST, &manifest_bytes)?;
        append_member(&mut builder, paths::BINDINGS, &payload)?;
        let tar_bytes = builder
            .into_inner()
            .map_err(|e| WriteArtifactError::Archive(e.to_string()))?;

        let compressed = zstd::encode_all(&tar_bytes[..], zstd::DEFAULT_COMPRESSION_LEVEL)
            .map_err(|e| WriteArtifactError::Compression(e.to_string()))?;

        Ok((compressed, manifest))
    }
}

impl Default for SnapshotWriter {
    fn default() -> Self {
        SnapshotWriter::new()
    }
}

fn append_member(
    builder: &mut tar::Builder<Vec<u8>>,
    member_path: &str,
    data: &[u8],
) -> Result<(), WriteArtifactError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();
    builder
        .append_data(&mut header, member_path, data)
        .map_err(|e| WriteArtifactError::Archive(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bindings() -> BTreeMap<String, Value> {
        let mut bindings = BTreeMap::new();
        bindings.insert("a".to_string(), Value::Int(1));
        bindings.insert(
            "b".to_string(),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
        bindings
    }

    #[test]
    fn test_write_to_vec_manifest() {
        let writer = SnapshotWriter::new();
        let (data, manifest) = writer.write_to_vec(&sample_bindings()).unwrap();

        assert!(!data.is_empty());
        assert_eq!(manifest.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(manifest.binding_count, 2);
        assert!(manifest.checksums.contains_key(paths::BINDINGS_NAME));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.wssnap.tar.zst");

        let writer = SnapshotWriter::new();
        let info = writer.write(&sample_bindings(), &path).unwrap();

        assert!(path.exists());
        assert_eq!(info.binding_count, 2);
        assert_eq!(info.path, path);
    }

    #[test]
    fn test_write_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("test.wssnap.tar.zst");

        let writer = SnapshotWriter::new();
        let err = writer.write(&sample_bindings(), &path).unwrap_err();
        assert!(matches!(err, WriteArtifactError::Io(_)));
    }

    #[test]
    fn test_empty_mapping_is_writable() {
        let writer = SnapshotWriter::new();
        let (data, manifest) = writer.write_to_vec(&BTreeMap::new()).unwrap();
        assert!(!data.is_empty());
        assert_eq!(manifest.binding_count, 0);
    }
}
