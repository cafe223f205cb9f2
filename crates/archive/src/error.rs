//! Artifact error types

use std::io;
use thiserror::Error;

/// Errors raised while reading a snapshot artifact.
///
/// Every variant is fatal to the whole read: the artifact is rejected and
/// no partial mapping is ever returned.
#[derive(Debug, Error)]
pub enum ReadArtifactError {
    /// I/O failure, including a missing artifact file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a zstd stream
    #[error("zstd decompression failed: {0}")]
    Compression(String),

    /// The decompressed stream is not a readable tar archive
    #[error("tar archive error: {0}")]
    Archive(String),

    /// A required archive member is absent
    #[error("archive member missing: {0}")]
    MissingEntry(&'static str),

    /// The manifest is not valid JSON
    #[error("manifest parse failed: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The manifest declares a format this reader does not understand
    #[error("unsupported snapshot format version {version}")]
    UnsupportedVersion {
        /// Version found in the manifest
        version: u32,
    },

    /// The payload digest does not match the manifest
    #[error("checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Archive member name
        file: String,
        /// Digest recorded in the manifest
        expected: String,
        /// Digest of the actual bytes
        actual: String,
    },

    /// The bindings payload failed to decode
    #[error("bindings payload decode failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The decoded mapping disagrees with the manifest's binding count
    #[error("manifest declares {declared} bindings but payload holds {actual}")]
    CountMismatch {
        /// Count recorded in the manifest
        declared: usize,
        /// Count actually decoded
        actual: usize,
    },
}

/// Errors raised while writing a snapshot artifact.
///
/// Fatal to the capture call; the previously computed accepted set is
/// discarded by the caller.
#[derive(Debug, Error)]
pub enum WriteArtifactError {
    /// I/O failure while creating or writing the artifact file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// zstd compression failed
    #[error("zstd compression failed: {0}")]
    Compression(String),

    /// Building the tar archive failed
    #[error("tar archive error: {0}")]
    Archive(String),

    /// Encoding the bindings payload failed
    #[error("bindings payload encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Encoding the manifest failed
    #[error("manifest encode failed: {0}")]
    Manifest(#[from] serde_json::Error),
}
