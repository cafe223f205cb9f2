//! Snapshot artifact reader
//!
//! Reads `.wssnap.tar.zst` artifacts and validates their contents before
//! returning a single complete mapping. A corrupt artifact is rejected
//! outright; the reader never returns a partial mapping.

use crate::error::ReadArtifactError;
use crate::types::{
    paths, xxh3_hex, SnapshotManifest, SnapshotVerifyInfo, SNAPSHOT_EXTENSION,
    SNAPSHOT_FORMAT_VERSION,
};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tar::Archive;
use tracing::debug;
use worksnap_core::Value;

/// Reader for snapshot artifacts.
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read the complete bindings mapping from the artifact at `path`.
    ///
    /// Validates the manifest's format version, the payload checksum, and
    /// the declared binding count before decoding. All-or-nothing: any
    /// failure rejects the whole artifact.
    pub fn read(path: &Path) -> Result<BTreeMap<String, Value>, ReadArtifactError> {
        let files = Self::extract_all_files(path)?;
        let bindings = Self::decode(&files)?;
        debug!(path = %path.display(), bindings = bindings.len(), "snapshot artifact read");
        Ok(bindings)
    }

    /// Read the complete bindings mapping from in-memory artifact bytes.
    pub fn read_from_bytes(data: &[u8]) -> Result<BTreeMap<String, Value>, ReadArtifactError> {
        let decoder = zstd::Decoder::new(data)
            .map_err(|e| ReadArtifactError::Compression(format!("zstd decode: {}", e)))?;
        let files = Self::extract_entries(decoder)?;
        Self::decode(&files)
    }

    /// Read and parse the manifest only.
    pub fn read_manifest(path: &Path) -> Result<SnapshotManifest, ReadArtifactError> {
        let files = Self::extract_all_files(path)?;
        let manifest = Self::parse_manifest(&files)?;
        if manifest.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ReadArtifactError::UnsupportedVersion {
                version: manifest.format_version,
            });
        }
        Ok(manifest)
    }

    /// Validate an artifact's integrity without decoding bindings.
    ///
    /// Checks that the archive decompresses, that both members exist, that
    /// the format version is supported, and whether the payload checksum
    /// matches the manifest.
    pub fn validate(path: &Path) -> Result<SnapshotVerifyInfo, ReadArtifactError> {
        let files = Self::extract_all_files(path)?;
        let manifest = Self::parse_manifest(&files)?;
        if manifest.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ReadArtifactError::UnsupportedVersion {
                version: manifest.format_version,
            });
        }

        let payload = files
            .get(paths::BINDINGS_NAME)
            .ok_or(ReadArtifactError::MissingEntry(paths::BINDINGS_NAME))?;

        let checksums_valid = match manifest.checksums.get(paths::BINDINGS_NAME) {
            Some(expected) => expected == &xxh3_hex(payload),
            None => false,
        };

        Ok(SnapshotVerifyInfo {
            snapshot_id: manifest.snapshot_id,
            format_version: manifest.format_version,
            binding_count: manifest.binding_count,
            checksums_valid,
        })
    }

    fn parse_manifest(
        files: &HashMap<String, Vec<u8>>,
    ) -> Result<SnapshotManifest, ReadArtifactError> {
        let manifest_data = files
            .get(paths::MANIFEST_NAME)
            .ok_or(ReadArtifactError::MissingEntry(paths::MANIFEST_NAME))?;
        let manifest: SnapshotManifest = serde_json::from_slice(manifest_data)?;
        Ok(manifest)
    }

    fn decode(
        files: &HashMap<String, Vec<u8>>,
    ) -> Result<BTreeMap<String, Value>, ReadArtifactError> {
        let manifest = Self::parse_manifest(files)?;
        if manifest.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ReadArtifactError::UnsupportedVersion {
                version: manifest.format_version,
            });
        }

        let payload = files
            .get(paths::BINDINGS_NAME)
            .ok_or(ReadArtifactError::MissingEntry(paths::BINDINGS_NAME))?;

        if let Some(expected) = manifest.checksums.get(paths::BINDINGS_NAME) {
            let actual = xxh3_hex(payload);
            if expected != &actual {
                return Err(ReadArtifactError::ChecksumMismatch {
                    file: paths::BINDINGS_NAME.to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        let bindings: BTreeMap<String, Value> = rmp_serde::from_slice(payload)?;
        if bindings.len() != manifest.binding_count {
            return Err(ReadArtifactError::CountMismatch {
                declared: manifest.binding_count,
                actual: bindings.len(),
            });
        }

        Ok(bindings)
    }

    /// Extract all archive members into a name→bytes map.
    fn extract_all_files(path: &Path) -> Result<HashMap<String, Vec<u8>>, ReadArtifactError> {
        let file = File::open(path)?;
        let decoder = zstd::Decoder::new(BufReader::new(file))
            .map_err(|e| ReadArtifactError::Compression(format!("zstd decode: {}", e)))?;
        Self::extract_entries(decoder)
    }

    fn extract_entries<R: Read>(
        decoder: R,
    ) -> Result<HashMap<String, Vec<u8>>, ReadArtifactError> {
        let mut archive = Archive::new(decoder);
        let mut files = HashMap::new();
        let prefix = format!("{}/", paths::ROOT);

        for entry in archive
            .entries()
            .map_err(|e| ReadArtifactError::Archive(e.to_string()))?
        {
            let mut entry = entry.map_err(|e| ReadArtifactError::Archive(e.to_string()))?;
            let entry_path = entry
                .path()
                .map_err(|e| ReadArtifactError::Archive(e.to_string()))?
                .to_string_lossy()
                .to_string();

            // Strip prefix to get the member name
            if let Some(name) = entry_path.strip_prefix(&prefix) {
                if !name.is_empty() {
                    let mut data = Vec::new();
                    entry
                        .read_to_end(&mut data)
                        .map_err(|e| ReadArtifactError::Archive(format!("read {}: {}", name, e)))?;
                    files.insert(name.to_string(), data);
                }
            }
        }

        Ok(files)
    }
}

/// Find the most recently modified artifact in `dir`.
///
/// Scans non-recursively for files with the snapshot extension and returns
/// the newest by modification time, or `None` if the directory holds no
/// artifacts.
pub fn latest_snapshot_in(dir: &Path) -> Result<Option<PathBuf>, ReadArtifactError> {
    let suffix = format!(".{}", SNAPSHOT_EXTENSION);
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_artifact = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(&suffix))
            .unwrap_or(false);
        if !is_artifact || !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        let newer = match &newest {
            Some((current, _)) => modified > *current,
            None => true,
        };
        if newer {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SnapshotWriter;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample_bindings() -> BTreeMap<String, Value> {
        let mut bindings = BTreeMap::new();
        bindings.insert("a".to_string(), Value::Int(1));
        bindings.insert(
            "b".to_string(),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
        bindings.insert("msg".to_string(), Value::from("hello"));
        bindings
    }

    /// Build a raw artifact from explicit manifest and payload bytes, for
    /// tamper tests.
    fn build_raw_artifact(manifest_bytes: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (member_path, data) in [(paths::MANIFEST, manifest_bytes), (paths::BINDINGS, payload)]
        {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(0);
            header.set_cksum();
            builder.append_data(&mut header, member_path, data).unwrap();
        }
        let tar_bytes = builder.into_inner().unwrap();
        zstd::encode_all(&tar_bytes[..], 0).unwrap()
    }

    fn manifest_for(payload: &[u8], binding_count: usize, version: u32) -> SnapshotManifest {
        let mut checksums = BTreeMap::new();
        checksums.insert(paths::BINDINGS_NAME.to_string(), xxh3_hex(payload));
        SnapshotManifest {
            format_version: version,
            snapshot_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            binding_count,
            checksums,
        }
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.wssnap.tar.zst");

        let bindings = sample_bindings();
        SnapshotWriter::new().write(&bindings, &path).unwrap();

        let read = SnapshotReader::read(&path).unwrap();
        assert_eq!(read, bindings);

        // Order is lexicographic by name
        let names: Vec<&String> = read.keys().collect();
        assert_eq!(names, vec!["a", "b", "msg"]);
    }

    #[test]
    fn test_round_trip_bytes() {
        let bindings = sample_bindings();
        let (data, _) = SnapshotWriter::new().write_to_vec(&bindings).unwrap();
        let read = SnapshotReader::read_from_bytes(&data).unwrap();
        assert_eq!(read, bindings);
    }

    #[test]
    fn test_zero_binding_artifact_is_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wssnap.tar.zst");

        SnapshotWriter::new().write(&BTreeMap::new(), &path).unwrap();

        let read = SnapshotReader::read(&path).unwrap();
        assert!(read.is_empty());

        let info = SnapshotReader::validate(&path).unwrap();
        assert_eq!(info.binding_count, 0);
        assert!(info.checksums_valid);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent.wssnap.tar.zst");

        let err = SnapshotReader::read(&path).unwrap_err();
        assert!(matches!(err, ReadArtifactError::Io(_)));
    }

    #[test]
    fn test_garbage_file_is_not_an_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wssnap.tar.zst");
        std::fs::write(&path, b"this is not an artifact").unwrap();

        assert!(SnapshotReader::read(&path).is_err());
    }

    #[test]
    fn test_missing_manifest_member() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-manifest.wssnap.tar.zst");

        // Tar with only a payload member
        let mut builder = tar::Builder::new(Vec::new());
        let data = b"payload";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_cksum();
        builder
            .append_data(&mut header, paths::BINDINGS, &data[..])
            .unwrap();
        let tar_bytes = builder.into_inner().unwrap();
        std::fs::write(&path, zstd::encode_all(&tar_bytes[..], 0).unwrap()).unwrap();

        let err = SnapshotReader::read(&path).unwrap_err();
        assert!(matches!(
            err,
            ReadArtifactError::MissingEntry(paths::MANIFEST_NAME)
        ));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.wssnap.tar.zst");

        let payload = rmp_serde::to_vec_named(&BTreeMap::<String, Value>::new()).unwrap();
        let manifest = manifest_for(&payload, 0, SNAPSHOT_FORMAT_VERSION + 1);
        let manifest_bytes = serde_json::to_vec_pretty(&manifest).unwrap();
        std::fs::write(&path, build_raw_artifact(&manifest_bytes, &payload)).unwrap();

        let err = SnapshotReader::read(&path).unwrap_err();
        assert!(matches!(
            err,
            ReadArtifactError::UnsupportedVersion { version } if version == SNAPSHOT_FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn test_tampered_payload_fails_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tampered.wssnap.tar.zst");

        let mut bindings = BTreeMap::new();
        bindings.insert("x".to_string(), Value::Int(1));
        let payload = rmp_serde::to_vec_named(&bindings).unwrap();
        let mut manifest = manifest_for(&payload, 1, SNAPSHOT_FORMAT_VERSION);
        manifest
            .checksums
            .insert(paths::BINDINGS_NAME.to_string(), xxh3_hex(b"different"));
        let manifest_bytes = serde_json::to_vec_pretty(&manifest).unwrap();
        std::fs::write(&path, build_raw_artifact(&manifest_bytes, &payload)).unwrap();

        let err = SnapshotReader::read(&path).unwrap_err();
        assert!(matches!(err, ReadArtifactError::ChecksumMismatch { .. }));

        // validate() reports rather than errors
        let info = SnapshotReader::validate(&path).unwrap();
        assert!(!info.checksums_valid);
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("miscounted.wssnap.tar.zst");

        let mut bindings = BTreeMap::new();
        bindings.insert("x".to_string(), Value::Int(1));
        let payload = rmp_serde::to_vec_named(&bindings).unwrap();
        let manifest = manifest_for(&payload, 5, SNAPSHOT_FORMAT_VERSION);
        let manifest_bytes = serde_json::to_vec_pretty(&manifest).unwrap();
        std::fs::write(&path, build_raw_artifact(&manifest_bytes, &payload)).unwrap();

        let err = SnapshotReader::read(&path).unwrap_err();
        assert!(matches!(
            err,
            ReadArtifactError::CountMismatch {
                declared: 5,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_read_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.wssnap.tar.zst");

        SnapshotWriter::new().write(&sample_bindings(), &path).unwrap();

        let manifest = SnapshotReader::read_manifest(&path).unwrap();
        assert_eq!(manifest.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(manifest.binding_count, 3);
        assert!(manifest.checksums.contains_key(paths::BINDINGS_NAME));
    }

    #[test]
    fn test_latest_snapshot_in() {
        let dir = tempdir().unwrap();
        assert_eq!(latest_snapshot_in(dir.path()).unwrap(), None);

        let writer = SnapshotWriter::new();
        let older = dir.path().join("older.wssnap.tar.zst");
        writer.write(&BTreeMap::new(), &older).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(30));

        let newer = dir.path().join("newer.wssnap.tar.zst");
        writer.write(&sample_bindings(), &newer).unwrap();

        // Unrelated files are ignored
        std::fs::write(dir.path().join("notes.txt"), b"notes").unwrap();

        assert_eq!(latest_snapshot_in(dir.path()).unwrap(), Some(newer));
    }
}
