//! # Design
//!
//! - Constant-message errors for the upload folder.
//! - Context (bucket, filename, sizes) lives in fields so handlers can report it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors produced by the local media folder.
#[derive(Debug, Error)]
pub enum MediaError {
    /// IO failures while interacting with the upload folder.
    #[error("media io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The bucket segment does not name a known bucket.
    #[error("unknown media bucket")]
    UnknownBucket {
        /// Offending bucket name.
        value: String,
    },
    /// The file extension is not accepted by the upload policy.
    #[error("file type not allowed")]
    UnsupportedType {
        /// Extension that was rejected, without the dot.
        extension: Option<String>,
    },
    /// The payload exceeds the upload policy limit.
    #[error("file too large")]
    TooLarge {
        /// Submitted size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
    /// The filename is empty or escapes its bucket.
    #[error("invalid file name")]
    InvalidName {
        /// Offending filename.
        value: String,
    },
    /// The requested file does not exist.
    #[error("file not found")]
    NotFound {
        /// Bucket that was searched.
        bucket: &'static str,
        /// Filename that was requested.
        filename: String,
    },
}

impl MediaError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
