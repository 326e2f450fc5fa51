//! Promotional banners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::document::{
    Collection, Document, check_optional_max, require_text, trim_in_place, trim_optional,
};
use crate::error::Result;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 200;

/// A promotional banner shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionBanner {
    /// Identifier.
    pub id: String,
    /// Internal title.
    pub title: String,
    /// Internal description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Banner image.
    pub image_url: String,
    /// Click-through target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Title rendered over the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    /// Description rendered over the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
    /// Storage name of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Name of the image as uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Shown publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Manual sort key, ascending.
    #[serde(default)]
    pub order: i32,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Document for PromotionBanner {
    const COLLECTION: Collection = Collection::PromotionBanners;

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
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.image_url);
        trim_optional(&mut self.description);
        trim_optional(&mut self.link_url);
        trim_optional(&mut self.custom_title);
        trim_optional(&mut self.custom_description);
        trim_optional(&mut self.filename);
        trim_optional(&mut self.original_name);
    }

    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, Some(TITLE_MAX))?;
        require_text("image_url", &self.image_url, None)?;
        check_optional_max("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        check_optional_max("custom_title", self.custom_title.as_deref(), TITLE_MAX)?;
        check_optional_max(
            "custom_description",
            self.custom_description.as_deref(),
            DESCRIPTION_MAX,
        )
    }
}

/// Payload for creating a banner.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPromotionBanner {
    /// Internal title.
    pub title: String,
    /// Internal description.
    #[serde(default)]
    pub description: Option<String>,
    /// Banner image.
    pub image_url: String,
    /// Click-through target.
    #[serde(default)]
    pub link_url: Option<String>,
    /// Title rendered over the image.
    #[serde(default)]
    pub custom_title: Option<String>,
    /// Description rendered over the image.
    #[serde(default)]
    pub custom_description: Option<String>,
    /// Storage name of the image.
    #[serde(default)]
    pub filename: Option<String>,
    /// Name of the image as uploaded.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Shown publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Manual sort key.
    #[serde(default)]
    pub order: i32,
}

impl NewPromotionBanner {
    /// Build the stored document.
    #[must_use]
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> PromotionBanner {
        PromotionBanner {
            id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link_url: self.link_url,
            custom_title: self.custom_title,
            custom_description: self.custom_description,
            filename: self.filename,
            original_name: self.original_name,
            is_active: self.is_active,
            order: self.order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    #[test]
    fn custom_description_length_is_bounded() {
        let mut banner = NewPromotionBanner {
            title: "Temporada alta".to_string(),
            description: None,
            image_url: "/api/uploads/properties/a.jpg".to_string(),
            link_url: None,
            custom_title: Some(" ".to_string()),
            custom_description: Some("d".repeat(DESCRIPTION_MAX + 1)),
            filename: None,
            original_name: None,
            is_active: true,
            order: 1,
        }
        .into_document("b1".to_string(), Utc::now());
        banner.normalize();
        assert_eq!(banner.custom_title, None);
        assert!(matches!(
            banner.validate(),
            Err(DataError::Invalid {
                field: "custom_description",
                ..
            })
        ));
    }
}
