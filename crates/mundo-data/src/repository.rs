//! Typed content operations over any [`ContentStore`].
//!
//! # Design
//! - Documents are normalised and validated before every write.
//! - Listing loads a collection and filters in process; collections stay small.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::document::{Collection, Document, apply_patch};
use crate::error::{DataError, Result};
use crate::filter::{PropertyFilter, ReviewFilter, by_order_then_newest};
use crate::model::{AdminUser, HeroMedia, NewAdminUser, PromotionBanner, Property, Review};
use crate::store::ContentStore;

/// Generate a fresh document identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Typed facade shared by request handlers.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn ContentStore>,
}

impl Repository {
    /// Wrap a backend.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Backend name for health reporting.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Load one document.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] when no document has this id.
    pub async fn get<D: Document>(&self, id: &str) -> Result<D> {
        let value = self
            .store
            .fetch(D::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found::<D>(id))?;
        decode::<D>(value)
    }

    /// Normalise, validate, and store a new document.
    ///
    /// # Errors
    ///
    /// Returns a validation error, a conflict, or a backend failure.
    pub async fn create<D: Document>(&self, mut document: D) -> Result<D> {
        document.normalize();
        document.validate()?;
        self.store
            .insert(D::COLLECTION, document.id(), encode(&document)?)
            .await?;
        debug!(
            collection = D::COLLECTION.as_str(),
            id = document.id(),
            "document created"
        );
        Ok(document)
    }

    /// Merge `patch` into a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`], a validation error, or a backend failure.
    pub async fn update<D: Document>(
        &self,
        id: &str,
        patch: &Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<D> {
        let current = self.get::<D>(id).await?;
        let updated = apply_patch(&current, patch, now)?;
        self.save(&updated).await?;
        Ok(updated)
    }

    /// Delete a document and return what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] or a backend failure.
    pub async fn delete<D: Document>(&self, id: &str) -> Result<D> {
        let current = self.get::<D>(id).await?;
        if !self.store.remove(D::COLLECTION, id).await? {
            return Err(not_found::<D>(id));
        }
        debug!(collection = D::COLLECTION.as_str(), id, "document deleted");
        Ok(current)
    }

    /// Listings matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let mut properties: Vec<Property> = self.load_all().await?;
        properties.retain(|property| filter.matches(property));
        properties.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(properties)
    }

    /// Reviews matching `filter`, by `order` then newest, truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self.load_all().await?;
        reviews.retain(|review| filter.matches(review));
        reviews.sort_by(by_order_then_newest(|r: &Review| r.order, |r| r.created_at));
        if let Some(limit) = filter.limit {
            reviews.truncate(limit);
        }
        Ok(reviews)
    }

    /// Banners by `order` then newest.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn list_banners(&self, include_inactive: bool) -> Result<Vec<PromotionBanner>> {
        let mut banners: Vec<PromotionBanner> = self.load_all().await?;
        banners.retain(|banner| include_inactive || banner.is_active);
        banners.sort_by(by_order_then_newest(
            |b: &PromotionBanner| b.order,
            |b| b.created_at,
        ));
        Ok(banners)
    }

    /// Hero slides by `order` then newest.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn list_hero_media(&self, include_inactive: bool) -> Result<Vec<HeroMedia>> {
        let mut slides: Vec<HeroMedia> = self.load_all().await?;
        slides.retain(|slide| include_inactive || slide.is_active);
        slides.sort_by(by_order_then_newest(|h: &HeroMedia| h.order, |h| h.created_at));
        Ok(slides)
    }

    /// Admin accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn list_admins(&self) -> Result<Vec<AdminUser>> {
        let mut admins: Vec<AdminUser> = self.load_all().await?;
        admins.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(admins)
    }

    /// Look up an admin by exact username.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let admins: Vec<AdminUser> = self.load_all().await?;
        Ok(admins.into_iter().find(|admin| admin.username == username))
    }

    /// Create an admin account around an already computed password hash.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Conflict`] when the username is taken, or a
    /// validation or backend failure.
    pub async fn create_admin(
        &self,
        new_admin: NewAdminUser,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<AdminUser> {
        new_admin.validate()?;
        let username = new_admin.username.trim().to_string();
        if self.find_admin_by_username(&username).await?.is_some() {
            return Err(DataError::Conflict {
                collection: Collection::AdminUsers.as_str(),
                field: "username",
            });
        }
        let admin = NewAdminUser {
            username,
            ..new_admin
        }
        .into_document(new_id(), password_hash, now);
        self.create(admin).await
    }

    /// Stamp a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] or a backend failure.
    pub async fn record_login(&self, id: &str, now: DateTime<Utc>) -> Result<AdminUser> {
        let mut admin = self.get::<AdminUser>(id).await?;
        admin.last_login = Some(now);
        admin.touch(now);
        self.save(&admin).await?;
        Ok(admin)
    }

    /// Number of admin accounts.
    ///
    /// # Errors
    ///
    /// Returns a backend failure.
    pub async fn admin_count(&self) -> Result<u64> {
        self.store.count(Collection::AdminUsers).await
    }

    async fn save<D: Document>(&self, document: &D) -> Result<()> {
        if self
            .store
            .replace(D::COLLECTION, document.id(), encode(document)?)
            .await?
        {
            Ok(())
        } else {
            Err(not_found::<D>(document.id()))
        }
    }

    async fn load_all<D: Document>(&self) -> Result<Vec<D>> {
        self.store
            .fetch_all(D::COLLECTION)
            .await?
            .into_iter()
            .map(decode::<D>)
            .collect()
    }
}

fn encode<D: Document>(document: &D) -> Result<Value> {
    serde_json::to_value(document).map_err(|source| DataError::Serialization {
        collection: D::COLLECTION.as_str(),
        source,
    })
}

fn decode<D: Document>(value: Value) -> Result<D> {
    serde_json::from_value(value).map_err(|source| DataError::Serialization {
        collection: D::COLLECTION.as_str(),
        source,
    })
}

fn not_found<D: Document>(id: &str) -> DataError {
    DataError::NotFound {
        collection: D::COLLECTION.as_str(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::{NewProperty, NewReview, PropertyKind};
    use chrono::Duration;
    use mundo_auth::Role;
    use serde_json::json;

    fn repository() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn property(title: &str, kind: PropertyKind, bedrooms: u32, at: DateTime<Utc>) -> Property {
        NewProperty {
            title: title.to_string(),
            description: "desc".to_string(),
            kind,
            bedrooms,
            bathrooms: 1,
            has_pool: bedrooms > 2,
            is_furnished: true,
            amenities: Vec::new(),
            images: Vec::new(),
            price: 100.0,
            location: "Cartagena".to_string(),
            google_map_url: None,
            is_active: true,
        }
        .into_document(new_id(), at)
    }

    fn review(order: i32, at: DateTime<Utc>) -> Review {
        NewReview {
            customer_name: format!("guest {order}"),
            customer_email: None,
            rating: 5,
            comment: "great".to_string(),
            customer_image: None,
            customer_video: None,
            is_active: true,
            is_featured: false,
            order,
            created_at: Some(at),
        }
        .into_document(new_id(), at)
    }

    #[tokio::test]
    async fn properties_are_filtered_and_newest_first() -> Result<()> {
        let repo = repository();
        let now = Utc::now();
        repo.create(property("old", PropertyKind::Apartment, 1, now - Duration::hours(2)))
            .await?;
        repo.create(property("new", PropertyKind::CountryHouse, 4, now))
            .await?;
        let mut hidden = property("hidden", PropertyKind::Apartment, 3, now);
        hidden.is_active = false;
        repo.create(hidden).await?;

        let all_active = repo.list_properties(&PropertyFilter::default()).await?;
        let titles: Vec<_> = all_active.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);

        let pools = repo
            .list_properties(&PropertyFilter {
                has_pool: true,
                ..PropertyFilter::default()
            })
            .await?;
        assert_eq!(pools.len(), 1);

        let everything = repo
            .list_properties(&PropertyFilter {
                all: true,
                min_bedrooms: Some(3),
                ..PropertyFilter::default()
            })
            .await?;
        assert_eq!(everything.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn reviews_sort_by_order_then_newest_and_limit() -> Result<()> {
        let repo = repository();
        let now = Utc::now();
        let first = repo.create(review(0, now - Duration::days(1))).await?;
        let second = repo.create(review(0, now)).await?;
        let third = repo.create(review(1, now + Duration::days(1))).await?;

        let listed = repo.list_reviews(&ReviewFilter::default()).await?;
        let ids: Vec<_> = listed.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id, third.id]);

        let limited = repo
            .list_reviews(&ReviewFilter {
                limit: Some(1),
                ..ReviewFilter::default()
            })
            .await?;
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_revalidates() -> Result<()> {
        let repo = repository();
        let created = repo
            .create(property("Casa", PropertyKind::CountryHouse, 3, Utc::now()))
            .await?;

        let patch = json!({ "title": "  Casa Finca  ", "id": "hijack" });
        let Value::Object(patch) = patch else {
            panic!("patch fixture must be an object");
        };
        let updated: Property = repo.update(&created.id, &patch, Utc::now()).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Casa Finca");
        assert_eq!(updated.bedrooms, 3);

        let Value::Object(bad) = json!({ "title": "" }) else {
            panic!("patch fixture must be an object");
        };
        assert!(matches!(
            repo.update::<Property>(&created.id, &bad, Utc::now()).await,
            Err(DataError::Invalid { field: "title", .. })
        ));

        let Value::Object(wrong_type) = json!({ "bedrooms": "many" }) else {
            panic!("patch fixture must be an object");
        };
        assert!(matches!(
            repo.update::<Property>(&created.id, &wrong_type, Utc::now())
                .await,
            Err(DataError::Malformed { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_document_and_then_not_found() -> Result<()> {
        let repo = repository();
        let created = repo
            .create(property("Apto", PropertyKind::Apartment, 1, Utc::now()))
            .await?;
        let deleted: Property = repo.delete(&created.id).await?;
        assert_eq!(deleted.id, created.id);
        assert!(matches!(
            repo.get::<Property>(&created.id).await,
            Err(DataError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete::<Property>(&created.id).await,
            Err(DataError::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn admin_accounts_are_unique_and_track_logins() -> Result<()> {
        let repo = repository();
        let now = Utc::now();
        let new_admin = |username: &str| NewAdminUser {
            username: username.to_string(),
            password: "secret1".to_string(),
            email: None,
            role: Role::SuperAdmin,
        };
        let owner = repo
            .create_admin(new_admin("owner"), "$argon2id$hash".to_string(), now)
            .await?;
        assert!(matches!(
            repo.create_admin(new_admin(" owner "), "$argon2id$hash".to_string(), now)
                .await,
            Err(DataError::Conflict {
                field: "username",
                ..
            })
        ));
        assert_eq!(repo.admin_count().await?, 1);

        let stamped = repo.record_login(&owner.id, now).await?;
        assert_eq!(stamped.last_login, Some(now));
        let found = repo.find_admin_by_username("owner").await?;
        assert_eq!(found.and_then(|admin| admin.last_login), Some(now));

        let Value::Object(patch) = json!({ "password_hash": "plain", "is_active": false })
        else {
            panic!("patch fixture must be an object");
        };
        let updated: AdminUser = repo.update(&owner.id, &patch, now).await?;
        assert_eq!(updated.password_hash, "$argon2id$hash");
        assert!(!updated.is_active);
        Ok(())
    }
}
