//! Upload buckets, media kinds, and per-bucket upload policy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MediaError;

/// Extensions accepted as images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];
/// Extensions accepted as video.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

/// Subdirectory of the upload root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Listing gallery images.
    Properties,
    /// Customer review photos and clips.
    Reviews,
    /// Landing-page hero media.
    HeroImages,
}

impl Bucket {
    /// Every bucket.
    pub const ALL: [Self; 3] = [Self::Properties, Self::Reviews, Self::HeroImages];

    /// Directory and URL segment for the bucket.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Reviews => "reviews",
            Self::HeroImages => "hero-images",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = MediaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == value)
            .ok_or_else(|| MediaError::UnknownBucket {
                value: value.to_string(),
            })
    }
}

/// Broad media category derived from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl MediaKind {
    /// Classify a lower-case extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        if IMAGE_EXTENSIONS.contains(&extension) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&extension) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// Limits applied to a single uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted payload in bytes.
    pub max_bytes: u64,
    /// Whether video extensions are accepted.
    pub allow_video: bool,
}

impl UploadPolicy {
    /// Policy for `bucket` given the configured image and hero limits.
    ///
    /// Review clips share the image limit; hero media has its own.
    #[must_use]
    pub const fn for_bucket(bucket: Bucket, max_image_bytes: u64, max_hero_bytes: u64) -> Self {
        match bucket {
            Bucket::Properties => Self {
                max_bytes: max_image_bytes,
                allow_video: false,
            },
            Bucket::Reviews => Self {
                max_bytes: max_image_bytes,
                allow_video: true,
            },
            Bucket::HeroImages => Self {
                max_bytes: max_hero_bytes,
                allow_video: true,
            },
        }
    }

    /// Kind accepted for `extension`, if any.
    #[must_use]
    pub fn accepts(&self, extension: &str) -> Option<MediaKind> {
        match MediaKind::from_extension(extension)? {
            MediaKind::Video if !self.allow_video => None,
            kind => Some(kind),
        }
    }
}

/// Content type served for a stored filename.
#[must_use]
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// Lower-case extension after the last dot, if any.
#[must_use]
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_parses_known_segments_only() {
        assert_eq!("hero-images".parse::<Bucket>().ok(), Some(Bucket::HeroImages));
        assert_eq!("properties".parse::<Bucket>().ok(), Some(Bucket::Properties));
        assert!(matches!(
            "../etc".parse::<Bucket>(),
            Err(MediaError::UnknownBucket { .. })
        ));
    }

    #[test]
    fn policy_gates_video_per_bucket() {
        let properties = UploadPolicy::for_bucket(Bucket::Properties, 10, 50);
        assert_eq!(properties.accepts("png"), Some(MediaKind::Image));
        assert_eq!(properties.accepts("mp4"), None);

        let hero = UploadPolicy::for_bucket(Bucket::HeroImages, 10, 50);
        assert_eq!(hero.max_bytes, 50);
        assert_eq!(hero.accepts("mov"), Some(MediaKind::Video));
        assert_eq!(hero.accepts("exe"), None);
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("clip.mov"), "video/quicktime");
        assert_eq!(content_type_for("clip.avi"), "video/x-msvideo");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }

    #[test]
    fn extension_requires_stem() {
        assert_eq!(extension_of("photo.WebP").as_deref(), Some("webp"));
        assert_eq!(extension_of(".png"), None);
        assert_eq!(extension_of("photo."), None);
        assert_eq!(extension_of("photo"), None);
    }
}
