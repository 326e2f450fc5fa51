//! Customer reviews.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{MediaRef, default_true};
use crate::document::{Collection, Document, require_text, trim_in_place, trim_optional};
use crate::error::{DataError, Result};

/// Maximum customer name length in characters.
pub const NAME_MAX: usize = 100;
/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 500;

static EMAIL_SHAPE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Identifier.
    pub id: String,
    /// Reviewer name.
    pub customer_name: String,
    /// Reviewer email, lower-cased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Reviewer photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_image: Option<MediaRef>,
    /// Reviewer video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_video: Option<MediaRef>,
    /// Shown publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Highlighted on the landing page.
    #[serde(default)]
    pub is_featured: bool,
    /// Manual sort key, ascending.
    #[serde(default)]
    pub order: i32,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Document for Review {
    const COLLECTION: Collection = Collection::Reviews;

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
        trim_in_place(&mut self.customer_name);
        trim_in_place(&mut self.comment);
        trim_optional(&mut self.customer_email);
        if let Some(email) = self.customer_email.as_mut() {
            *email = email.to_lowercase();
        }
        if let Some(image) = self.customer_image.as_mut() {
            image.normalize();
        }
        if let Some(video) = self.customer_video.as_mut() {
            video.normalize();
        }
    }

    fn validate(&self) -> Result<()> {
        require_text("customer_name", &self.customer_name, Some(NAME_MAX))?;
        require_text("comment", &self.comment, Some(COMMENT_MAX))?;
        if !(1..=5).contains(&self.rating) {
            return Err(DataError::invalid("rating", "out_of_range"));
        }
        if let Some(email) = self.customer_email.as_deref() {
            let valid = EMAIL_SHAPE
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(email));
            if !valid {
                return Err(DataError::invalid("customer_email", "invalid_email"));
            }
        }
        Ok(())
    }
}

/// Payload for creating a review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// Reviewer name.
    pub customer_name: String,
    /// Reviewer email.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Star rating.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Reviewer photo.
    #[serde(default)]
    pub customer_image: Option<MediaRef>,
    /// Reviewer video.
    #[serde(default)]
    pub customer_video: Option<MediaRef>,
    /// Shown publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Highlighted.
    #[serde(default)]
    pub is_featured: bool,
    /// Manual sort key.
    #[serde(default)]
    pub order: i32,
    /// Backdated creation instant for imported reviews.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewReview {
    /// Build the stored document.
    #[must_use]
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> Review {
        Review {
            id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            rating: self.rating,
            comment: self.comment,
            customer_image: self.customer_image,
            customer_video: self.customer_video,
            is_active: self.is_active,
            is_featured: self.is_featured,
            order: self.order,
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Review {
        NewReview {
            customer_name: " Laura ".to_string(),
            customer_email: Some(" Laura@Example.COM ".to_string()),
            rating: 5,
            comment: "Excelente estadía".to_string(),
            customer_image: None,
            customer_video: None,
            is_active: true,
            is_featured: false,
            order: 0,
            created_at: None,
        }
        .into_document("r1".to_string(), Utc::now())
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let mut review = sample();
        review.normalize();
        assert_eq!(review.customer_email.as_deref(), Some("laura@example.com"));
        assert_eq!(review.customer_name, "Laura");
        assert!(review.validate().is_ok());
    }

    #[test]
    fn rating_bounds_are_enforced() {
        for rating in [0, 6] {
            let mut review = sample();
            review.normalize();
            review.rating = rating;
            assert!(matches!(
                review.validate(),
                Err(DataError::Invalid { field: "rating", .. })
            ));
        }
    }

    #[test]
    fn malformed_email_and_long_comment_are_rejected() {
        let mut review = sample();
        review.customer_email = Some("not-an-email".to_string());
        assert!(matches!(
            review.validate(),
            Err(DataError::Invalid {
                field: "customer_email",
                ..
            })
        ));

        let mut review = sample();
        review.normalize();
        review.comment = "a".repeat(COMMENT_MAX + 1);
        assert!(matches!(
            review.validate(),
            Err(DataError::Invalid { field: "comment", .. })
        ));
    }

    #[test]
    fn backdated_creation_is_kept() {
        let then = Utc::now() - chrono::Duration::days(30);
        let review = NewReview {
            created_at: Some(then),
            ..serde_json::from_value::<NewReview>(serde_json::json!({
                "customer_name": "Ana",
                "rating": 4,
                "comment": "Muy bien"
            }))
            .unwrap_or_else(|err| panic!("fixture should decode: {err}"))
        }
        .into_document("r2".to_string(), Utc::now());
        assert_eq!(review.created_at, then);
        assert!(review.is_active);
    }
}
