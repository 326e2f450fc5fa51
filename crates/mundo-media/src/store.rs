//! Upload folder backed by the local filesystem.
//!
//! # Design
//! - Each bucket is a subdirectory of the root, created on first write.
//! - Stored names are `<uuid><.ext>`; the submitted name is only echoed back.
//! - Reads accept a single normal path segment so a request cannot leave its bucket.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bucket::{Bucket, MediaKind, UploadPolicy, content_type_for, extension_of};
use crate::error::{MediaError, MediaResult};

/// URL prefix under which stored files are served.
pub const UPLOAD_URL_PREFIX: &str = "/api/uploads";

/// Metadata describing a freshly stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Public URL of the file.
    pub url: String,
    /// Generated filename inside the bucket.
    pub filename: String,
    /// Name the client submitted.
    pub original_name: String,
    /// Media category.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Size in bytes.
    pub size: u64,
}

/// A file read back from the folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    /// File contents.
    pub bytes: Vec<u8>,
    /// Content type derived from the extension.
    pub content_type: &'static str,
}

/// Local media folder rooted at a configured directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Build a store rooted at `root`. Nothing is created until the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the folder.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that holds `bucket`.
    #[must_use]
    pub fn bucket_dir(&self, bucket: Bucket) -> PathBuf {
        self.root.join(bucket.as_str())
    }

    /// Create every bucket directory.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Io`] when a directory cannot be created.
    pub async fn ensure_buckets(&self) -> MediaResult<()> {
        for bucket in Bucket::ALL {
            let dir = self.bucket_dir(bucket);
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| MediaError::io("create_bucket", &dir, source))?;
        }
        debug!(root = %self.root.display(), "upload buckets ready");
        Ok(())
    }

    /// Validate and persist one uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnsupportedType`] or [`MediaError::TooLarge`] when
    /// the policy rejects the file, or [`MediaError::Io`] when the write fails.
    pub async fn store(
        &self,
        bucket: Bucket,
        original_name: &str,
        bytes: &[u8],
        policy: UploadPolicy,
    ) -> MediaResult<StoredFile> {
        let extension = extension_of(original_name);
        let kind = extension
            .as_deref()
            .and_then(|ext| policy.accepts(ext))
            .ok_or_else(|| MediaError::UnsupportedType {
                extension: extension.clone(),
            })?;
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > policy.max_bytes {
            return Err(MediaError::TooLarge {
                size,
                limit: policy.max_bytes,
            });
        }

        let dir = self.bucket_dir(bucket);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| MediaError::io("create_bucket", &dir, source))?;

        let filename = match extension {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = dir.join(&filename);
        fs::write(&path, bytes)
            .await
            .map_err(|source| MediaError::io("write_file", &path, source))?;

        info!(bucket = %bucket, filename = %filename, size, "stored upload");
        Ok(StoredFile {
            url: format!("{UPLOAD_URL_PREFIX}/{bucket}/{filename}"),
            filename,
            original_name: original_name.to_string(),
            kind,
            size,
        })
    }

    /// Read a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::InvalidName`] for names that escape the bucket,
    /// [`MediaError::NotFound`] when absent, or [`MediaError::Io`].
    pub async fn open(&self, bucket: Bucket, filename: &str) -> MediaResult<OpenedFile> {
        let path = self.resolve(bucket, filename)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(OpenedFile {
                bytes,
                content_type: content_type_for(filename),
            }),
            Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                Err(MediaError::NotFound {
                    bucket: bucket.as_str(),
                    filename: filename.to_string(),
                })
            }
            Err(source) => Err(MediaError::io("read_file", &path, source)),
        }
    }

    /// Delete a stored file; returns whether a file was removed.
    ///
    /// Missing files and invalid names are not errors.
    pub async fn remove(&self, bucket: Bucket, filename: &str) -> bool {
        let Ok(path) = self.resolve(bucket, filename) else {
            warn!(bucket = %bucket, filename, "refusing to remove invalid media name");
            return false;
        };
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(bucket = %bucket, filename, "removed upload");
                true
            }
            Err(err) if err.kind() == ErrorKind::NotFound => false,
            Err(err) => {
                warn!(bucket = %bucket, filename, error = %err, "failed to remove upload");
                false
            }
        }
    }

    fn resolve(&self, bucket: Bucket, filename: &str) -> MediaResult<PathBuf> {
        let invalid = || MediaError::InvalidName {
            value: filename.to_string(),
        };
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(invalid());
        }
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.bucket_dir(bucket).join(filename)),
            _ => Err(invalid()),
        }
    }
}

/// Split a local upload URL into its bucket and filename.
///
/// Returns `None` for remote URLs or paths outside the upload prefix.
#[must_use]
pub fn parse_local_url(url: &str) -> Option<(Bucket, String)> {
    let rest = url.strip_prefix(UPLOAD_URL_PREFIX)?.strip_prefix('/')?;
    let (bucket, filename) = rest.split_once('/')?;
    let bucket = bucket.parse().ok()?;
    if filename.is_empty() || filename.contains('/') {
        return None;
    }
    Some((bucket, filename.to_string()))
}
