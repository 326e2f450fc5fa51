//! Landing-page hero images and videos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::document::{Collection, Document, require_text, trim_in_place};
use crate::error::Result;

/// Media type of a hero slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeroKind {
    /// Still image.
    #[default]
    Image,
    /// Video clip.
    Video,
}

/// A hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroMedia {
    /// Identifier.
    pub id: String,
    /// Public URL.
    pub url: String,
    /// Storage name.
    pub filename: String,
    /// Name as uploaded.
    pub original_name: String,
    /// Image or video.
    #[serde(default)]
    pub kind: HeroKind,
    /// Manual sort key, ascending.
    #[serde(default)]
    pub order: i32,
    /// Shown publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Document for HeroMedia {
    const COLLECTION: Collection = Collection::HeroMedia;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.url);
        trim_in_place(&mut self.filename);
        trim_in_place(&mut self.original_name);
    }

    fn validate(&self) -> Result<()> {
        require_text("url", &self.url, None)?;
        require_text("filename", &self.filename, None)?;
        require_text("original_name", &self.original_name, None)
    }
}

/// Payload for registering a hero slide.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHeroMedia {
    /// Public URL.
    pub url: String,
    /// Storage name; derived from the URL when omitted.
    #[serde(default)]
    pub filename: Option<String>,
    /// Name as uploaded.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Image or video.
    #[serde(default)]
    pub kind: HeroKind,
    /// Manual sort key.
    #[serde(default)]
    pub order: i32,
}

impl NewHeroMedia {
    /// Build the stored document.
    #[must_use]
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> HeroMedia {
        let filename = self.filename.unwrap_or_else(|| {
            self.url
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        });
        HeroMedia {
            id,
            url: self.url,
            filename,
            original_name: self
                .original_name
                .unwrap_or_else(|| "hero_image".to_string()),
            kind: self.kind,
            order: self.order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_defaults_to_last_url_segment() {
        let hero = NewHeroMedia {
            url: "/api/uploads/hero-images/abc.mp4".to_string(),
            filename: None,
            original_name: None,
            kind: HeroKind::Video,
            order: 2,
        }
        .into_document("h1".to_string(), Utc::now());
        assert_eq!(hero.filename, "abc.mp4");
        assert_eq!(hero.original_name, "hero_image");
        assert!(hero.is_active);
        assert!(hero.validate().is_ok());
    }
}
