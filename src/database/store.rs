use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::collection::Collection;

pub type Document = Map<String, Value>;

/// A document as persisted, with store-assigned timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: String,
    pub body: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. `unique_key` is `None` for the
    /// document key itself.
    #[error("duplicate document in {collection} ({})", .unique_key.unwrap_or("key"))]
    Duplicate {
        collection: Collection,
        unique_key: Option<&'static str>,
    },

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("stored document is malformed: {0}")]
    Corrupt(String),

    #[error("document store error: {0}")]
    Backend(String),
}

/// Single-document operations over named collections. Implementations must keep
/// insertion order for `list` and enforce each collection's unique keys.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: Collection, key: &str, body: Document) -> Result<StoredDocument, StoreError>;

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Documents whose top-level fields equal every given value.
    async fn find_by_fields(
        &self,
        collection: Collection,
        fields: &[(&str, &Value)],
    ) -> Result<Vec<StoredDocument>, StoreError>;

    async fn list(&self, collection: Collection, offset: u64, limit: u64) -> Result<Vec<StoredDocument>, StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Replace the body of an existing document. `Ok(None)` when the key is absent.
    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        body: Document,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Returns whether a document was removed.
    async fn remove(&self, collection: Collection, key: &str) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self) {}
}
