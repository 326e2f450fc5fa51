//! Storage backend contract.
//!
//! Backends persist opaque JSON documents per collection; typing, validation,
//! filtering and ordering live in [`crate::Repository`].

use async_trait::async_trait;
use serde_json::Value;

use crate::document::Collection;
use crate::error::Result;

/// Field that must be unique within a collection, if any.
#[must_use]
pub const fn unique_field(collection: Collection) -> Option<&'static str> {
    match collection {
        Collection::AdminUsers => Some("username"),
        _ => None,
    }
}

/// Document persistence backend.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;

    /// Store a new document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::Conflict`] when the id or a unique field is taken.
    async fn insert(&self, collection: Collection, id: &str, document: Value) -> Result<()>;

    /// Load one document.
    async fn fetch(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Load every document in a collection, in no particular order.
    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Overwrite an existing document. Returns `false` when it does not exist.
    async fn replace(&self, collection: Collection, id: &str, document: Value) -> Result<bool>;

    /// Delete a document. Returns `false` when it did not exist.
    async fn remove(&self, collection: Collection, id: &str) -> Result<bool>;

    /// Number of documents in a collection.
    async fn count(&self, collection: Collection) -> Result<u64>;
}
