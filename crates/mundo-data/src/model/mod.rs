//! Typed content documents and their creation payloads.
//!
//! # Design
//! - Pure data carriers; persistence lives in the store modules.
//! - Each document owns its normalisation and validation rules.

mod admin;
mod banner;
mod hero;
mod property;
mod review;

use serde::{Deserialize, Serialize};

use crate::document::{trim_in_place, trim_optional};

pub use admin::{AdminUser, AdminUserView, NewAdminUser};
pub use banner::{NewPromotionBanner, PromotionBanner};
pub use hero::{HeroKind, HeroMedia, NewHeroMedia};
pub use property::{NewProperty, Property, PropertyKind};
pub use review::{NewReview, Review};

/// Reference to an uploaded image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Public URL of the file.
    pub url: String,
    /// Storage name (local file name or host public id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Name of the file as uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl MediaRef {
    pub(crate) fn normalize(&mut self) {
        trim_in_place(&mut self.url);
        trim_optional(&mut self.filename);
        trim_optional(&mut self.original_name);
    }
}

const fn default_true() -> bool {
    true
}
