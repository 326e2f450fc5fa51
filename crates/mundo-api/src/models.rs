//! Wire types shared by the HTTP handlers.

use mundo_auth::Role;
use mundo_data::{AdminUserView, HeroMedia, PromotionBanner, Property};
use mundo_media::StoredFile;
use serde::{Deserialize, Serialize};

/// RFC 9457 problem document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short summary.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Fields that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_params: Option<Vec<ProblemInvalidParam>>,
}

/// Invalid parameter pointer surfaced alongside a [`ProblemDetails`] payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemInvalidParam {
    /// JSON pointer to the offending field.
    pub pointer: String,
    /// Machine-readable reason.
    pub message: String,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: &'static str,
    pub(crate) store: &'static str,
}

/// Listing enriched with derived links.
#[derive(Serialize)]
pub(crate) struct PropertyDetail {
    #[serde(flatten)]
    pub(crate) property: Property,
    pub(crate) embed_map_url: Option<String>,
    pub(crate) inquiry_url: String,
}

#[derive(Serialize)]
pub(crate) struct BannerList {
    pub(crate) banners: Vec<PromotionBanner>,
}

#[derive(Serialize)]
pub(crate) struct HeroList {
    pub(crate) images: Vec<HeroMedia>,
}

#[derive(Serialize)]
pub(crate) struct DeletedResponse {
    pub(crate) message: &'static str,
    pub(crate) id: String,
}

#[derive(Serialize)]
pub(crate) struct UploadResponse {
    pub(crate) files: Vec<StoredFile>,
}

#[derive(Deserialize)]
pub(crate) struct MapNormalizeRequest {
    pub(crate) url: String,
}

#[derive(Serialize)]
pub(crate) struct MapNormalizeResponse {
    pub(crate) embed_url: Option<String>,
    pub(crate) fallback_url: String,
    pub(crate) already_embedded: bool,
}

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
}

#[derive(Serialize)]
pub(crate) struct SessionUser {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) last_login: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Serialize)]
pub(crate) struct LoginResponse {
    pub(crate) message: &'static str,
    pub(crate) token: String,
    pub(crate) expires_at: chrono::DateTime<chrono::Utc>,
    pub(crate) user: SessionUser,
}

#[derive(Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: &'static str,
}

#[derive(Serialize)]
pub(crate) struct VerifyResponse {
    pub(crate) user: SessionUser,
}

#[derive(Serialize)]
pub(crate) struct AdminUserList {
    pub(crate) users: Vec<AdminUserView>,
}

#[derive(Serialize)]
pub(crate) struct AdminUserCreated {
    pub(crate) message: &'static str,
    pub(crate) user: AdminUserView,
}
