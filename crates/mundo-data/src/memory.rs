//! In-process store used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::document::Collection;
use crate::error::{DataError, Result};
use crate::store::{ContentStore, unique_field};

/// Volatile document store guarded by a `tokio` read-write lock.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: Collection, id: &str, document: Value) -> Result<()> {
        let mut guard = self.collections.write().await;
        let documents = guard.entry(collection).or_default();
        if documents.contains_key(id) {
            return Err(DataError::Conflict {
                collection: collection.as_str(),
                field: "id",
            });
        }
        if let Some(field) = unique_field(collection) {
            let candidate = document.get(field);
            if candidate.is_some()
                && documents
                    .values()
                    .any(|existing| existing.get(field) == candidate)
            {
                return Err(DataError::Conflict {
                    collection: collection.as_str(),
                    field,
                });
            }
        }
        documents.insert(id.to_string(), document);
        Ok(())
    }

    async fn fetch(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn replace(&self, collection: Collection, id: &str, document: Value) -> Result<bool> {
        let mut guard = self.collections.write().await;
        match guard
            .get_mut(&collection)
            .and_then(|documents| documents.get_mut(id))
        {
            Some(slot) => {
                *slot = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut guard = self.collections.write().await;
        Ok(guard
            .get_mut(&collection)
            .is_some_and(|documents| documents.remove(id).is_some()))
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        let guard = self.collections.read().await;
        let len = guard.get(&collection).map_or(0, HashMap::len);
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_fetch_replace_remove() -> Result<()> {
        let store = MemoryStore::new();
        store
            .insert(Collection::Properties, "p1", json!({ "id": "p1", "title": "A" }))
            .await?;
        assert_eq!(store.count(Collection::Properties).await?, 1);
        assert_eq!(store.count(Collection::Reviews).await?, 0);

        assert!(
            store
                .replace(Collection::Properties, "p1", json!({ "id": "p1", "title": "B" }))
                .await?
        );
        let fetched = store.fetch(Collection::Properties, "p1").await?;
        assert_eq!(fetched.map(|doc| doc["title"].clone()), Some(json!("B")));

        assert!(store.remove(Collection::Properties, "p1").await?);
        assert!(!store.remove(Collection::Properties, "p1").await?);
        assert!(
            !store
                .replace(Collection::Properties, "p1", json!({}))
                .await?
        );
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_ids_and_usernames_conflict() -> Result<()> {
        let store = MemoryStore::new();
        store
            .insert(Collection::AdminUsers, "a1", json!({ "username": "owner" }))
            .await?;
        assert!(matches!(
            store
                .insert(Collection::AdminUsers, "a1", json!({ "username": "other" }))
                .await,
            Err(DataError::Conflict { field: "id", .. })
        ));
        assert!(matches!(
            store
                .insert(Collection::AdminUsers, "a2", json!({ "username": "owner" }))
                .await,
            Err(DataError::Conflict {
                field: "username",
                ..
            })
        ));
        Ok(())
    }
}
