//! Collection identifiers and the shared document contract.
//!
//! # Design
//! - Every content type is persisted as one JSON document keyed by a string id.
//! - Partial updates merge top-level fields into the stored document, then
//!   re-run normalisation and validation on the typed result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{DataError, Result};

/// Logical collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Rental listings.
    Properties,
    /// Customer reviews.
    Reviews,
    /// Promotional banners.
    PromotionBanners,
    /// Landing-page hero images and videos.
    HeroMedia,
    /// Back-office accounts.
    AdminUsers,
}

impl Collection {
    /// Every collection, in migration order.
    pub const ALL: [Self; 5] = [
        Self::Properties,
        Self::Reviews,
        Self::PromotionBanners,
        Self::HeroMedia,
        Self::AdminUsers,
    ];

    /// Stable collection name used as the storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Reviews => "reviews",
            Self::PromotionBanners => "promotion_banners",
            Self::HeroMedia => "hero_media",
            Self::AdminUsers => "admin_users",
        }
    }
}

/// Fields a partial update may never overwrite.
const PROTECTED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Contract shared by every stored content type.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection that stores this type.
    const COLLECTION: Collection;

    /// Extra fields a partial update may not touch.
    const LOCKED_FIELDS: &'static [&'static str] = &[];

    /// Document identifier.
    fn id(&self) -> &str;

    /// Creation instant.
    fn created_at(&self) -> DateTime<Utc>;

    /// Record a modification at `now`.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Canonicalise field values (trimming, lower-casing) before validation.
    fn normalize(&mut self) {}

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Invalid`] naming the first offending field.
    fn validate(&self) -> Result<()>;
}

/// Merge `patch` into `current` and return the re-validated document.
///
/// # Errors
///
/// Returns [`DataError::Malformed`] when the merged document no longer decodes,
/// or [`DataError::Invalid`] when it fails validation.
pub fn apply_patch<D: Document>(
    current: &D,
    patch: &Map<String, Value>,
    now: DateTime<Utc>,
) -> Result<D> {
    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(source) => {
            return Err(DataError::Serialization {
                collection: D::COLLECTION.as_str(),
                source,
            });
        }
    };
    for (key, value) in patch {
        if PROTECTED_FIELDS.contains(&key.as_str()) || D::LOCKED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    let mut updated: D = serde_json::from_value(Value::Object(merged))
        .map_err(|source| DataError::Malformed { source })?;
    updated.normalize();
    updated.validate()?;
    updated.touch(now);
    Ok(updated)
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub(crate) fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim_in_place(inner);
    }
    if value.as_deref().is_some_and(str::is_empty) {
        *value = None;
    }
}

pub(crate) fn require_text(field: &'static str, value: &str, max_chars: Option<usize>) -> Result<()> {
    if value.is_empty() {
        return Err(DataError::invalid(field, "required"));
    }
    check_max(field, value, max_chars)
}

pub(crate) fn check_max(field: &'static str, value: &str, max_chars: Option<usize>) -> Result<()> {
    match max_chars {
        Some(max) if value.chars().count() > max => Err(DataError::invalid(field, "too_long")),
        _ => Ok(()),
    }
}

pub(crate) fn check_optional_max(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<()> {
    value.map_or(Ok(()), |inner| check_max(field, inner, Some(max_chars)))
}
