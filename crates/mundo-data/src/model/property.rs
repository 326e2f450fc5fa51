//! Rental listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaRef, default_true};
use crate::document::{Collection, Document, require_text, trim_in_place, trim_optional};
use crate::error::{DataError, Result};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;

/// Kind of rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// City apartment.
    Apartment,
    /// Country house ("finca").
    CountryHouse,
}

impl PropertyKind {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::CountryHouse => "country_house",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(Self::Apartment),
            "country_house" => Some(Self::CountryHouse),
            _ => None,
        }
    }
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Identifier.
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Kind of rental.
    pub kind: PropertyKind,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Has a pool.
    #[serde(default)]
    pub has_pool: bool,
    /// Comes furnished.
    #[serde(default)]
    pub is_furnished: bool,
    /// Free-form amenity tags.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Gallery images.
    #[serde(default)]
    pub images: Vec<MediaRef>,
    /// Nightly price.
    pub price: f64,
    /// Human-readable location.
    pub location: String,
    /// Map link; embeddable when it could be normalised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_map_url: Option<String>,
    /// Listed publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Document for Property {
    const COLLECTION: Collection = Collection::Properties;

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
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.location);
        trim_optional(&mut self.google_map_url);
        self.amenities.iter_mut().for_each(trim_in_place);
        self.amenities.retain(|amenity| !amenity.is_empty());
        self.images.iter_mut().for_each(MediaRef::normalize);
    }

    fn validate(&self) -> Result<()> {
        require_text("title", &self.title, Some(TITLE_MAX))?;
        require_text("description", &self.description, None)?;
        require_text("location", &self.location, None)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DataError::invalid("price", "must_be_non_negative"));
        }
        if self.images.iter().any(|image| image.url.is_empty()) {
            return Err(DataError::invalid("images", "url_required"));
        }
        Ok(())
    }
}

/// Payload for creating a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    /// Listing title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Kind of rental.
    pub kind: PropertyKind,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Has a pool.
    #[serde(default)]
    pub has_pool: bool,
    /// Comes furnished.
    #[serde(default)]
    pub is_furnished: bool,
    /// Amenity tags.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Gallery images.
    #[serde(default)]
    pub images: Vec<MediaRef>,
    /// Nightly price.
    pub price: f64,
    /// Human-readable location.
    pub location: String,
    /// Map link as pasted.
    #[serde(default)]
    pub google_map_url: Option<String>,
    /// Listed publicly.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewProperty {
    /// Build the stored document.
    #[must_use]
    pub fn into_document(self, id: String, now: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            description: self.description,
            kind: self.kind,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            has_pool: self.has_pool,
            is_furnished: self.is_furnished,
            amenities: self.amenities,
            images: self.images,
            price: self.price,
            location: self.location,
            google_map_url: self.google_map_url,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        NewProperty {
            title: "  Apartamento Bocagrande ".to_string(),
            description: "Vista al mar".to_string(),
            kind: PropertyKind::Apartment,
            bedrooms: 2,
            bathrooms: 1,
            has_pool: true,
            is_furnished: true,
            amenities: vec![" wifi ".to_string(), String::new()],
            images: Vec::new(),
            price: 350_000.0,
            location: "Cartagena".to_string(),
            google_map_url: Some("   ".to_string()),
            is_active: true,
        }
        .into_document("p1".to_string(), Utc::now())
    }

    #[test]
    fn normalize_trims_and_drops_blank_values() {
        let mut property = sample();
        property.normalize();
        assert_eq!(property.title, "Apartamento Bocagrande");
        assert_eq!(property.amenities, vec!["wifi".to_string()]);
        assert_eq!(property.google_map_url, None);
        assert!(property.validate().is_ok());
    }

    #[test]
    fn validate_rejects_long_titles_and_negative_prices() {
        let mut property = sample();
        property.title = "x".repeat(TITLE_MAX + 1);
        assert!(matches!(
            property.validate(),
            Err(DataError::Invalid { field: "title", .. })
        ));

        let mut property = sample();
        property.price = -1.0;
        assert!(matches!(
            property.validate(),
            Err(DataError::Invalid { field: "price", .. })
        ));
    }

    #[test]
    fn kind_uses_snake_case() {
        assert_eq!(PropertyKind::parse("country_house"), Some(PropertyKind::CountryHouse));
        assert_eq!(PropertyKind::parse("villa"), None);
        assert_eq!(PropertyKind::CountryHouse.as_str(), "country_house");
    }
}
