//! Listing filters and sort orders.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::model::{Property, PropertyKind, Review};

/// Filter for property listings. Inactive listings are hidden unless `all` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    /// Include inactive listings.
    pub all: bool,
    /// Restrict to one kind.
    pub kind: Option<PropertyKind>,
    /// Only listings with a pool.
    pub has_pool: bool,
    /// Only furnished listings.
    pub is_furnished: bool,
    /// Minimum bedroom count.
    pub min_bedrooms: Option<u32>,
    /// Minimum bathroom count.
    pub min_bathrooms: Option<u32>,
}

impl PropertyFilter {
    /// Whether `property` passes the filter.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        (self.all || property.is_active)
            && self.kind.is_none_or(|kind| property.kind == kind)
            && (!self.has_pool || property.has_pool)
            && (!self.is_furnished || property.is_furnished)
            && self.min_bedrooms.is_none_or(|min| property.bedrooms >= min)
            && self.min_bathrooms.is_none_or(|min| property.bathrooms >= min)
    }
}

/// Filter for review listings.
///
/// Active reviews only by default; `all` lifts that, an explicit `is_active`
/// selects one side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewFilter {
    /// Ignore the active flag entirely.
    pub all: bool,
    /// Select active or inactive reviews.
    pub is_active: Option<bool>,
    /// Only featured reviews.
    pub is_featured: bool,
    /// Minimum star rating.
    pub min_rating: Option<u8>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl ReviewFilter {
    /// Whether `review` passes the filter, ignoring `limit`.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        let active_ok = if self.all {
            true
        } else {
            review.is_active == self.is_active.unwrap_or(true)
        };
        active_ok
            && (!self.is_featured || review.is_featured)
            && self.min_rating.is_none_or(|min| review.rating >= min)
    }
}

/// Ascending `order`, newest first among equal keys.
pub(crate) fn by_order_then_newest<T>(
    order: impl Fn(&T) -> i32,
    created: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> impl Fn(&T, &T) -> Ordering {
    move |left, right| {
        order(left)
            .cmp(&order(right))
            .then_with(|| created(right).cmp(&created(left)))
    }
}
