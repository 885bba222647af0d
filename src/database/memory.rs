use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::collection::Collection;
use super::store::{Document, DocumentStore, StoreError, StoredDocument};

/// Process-local store. Nothing survives a restart; used for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The first unique key of `collection` that `body` shares with a document other
/// than `except`. Keys with a missing or null field never collide.
fn violated_key(
    collection: Collection,
    docs: &[StoredDocument],
    body: &Document,
    except: Option<&str>,
) -> Option<&'static str> {
    collection.unique_keys().iter().find_map(|key| {
        let values: Option<Vec<&Value>> = key
            .fields
            .iter()
            .map(|f| body.get(*f).filter(|v| !v.is_null()))
            .collect();
        let values = values?;
        let clash = docs.iter().any(|doc| {
            Some(doc.key.as_str()) != except
                && key
                    .fields
                    .iter()
                    .zip(&values)
                    .all(|(f, v)| doc.body.get(*f) == Some(*v))
        });
        clash.then_some(key.name)
    })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, key: &str, body: Document) -> Result<StoredDocument, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if docs.iter().any(|d| d.key == key) {
            return Err(StoreError::Duplicate {
                collection,
                unique_key: None,
            });
        }
        if let Some(name) = violated_key(collection, docs, &body, None) {
            return Err(StoreError::Duplicate {
                collection,
                unique_key: Some(name),
            });
        }

        let now = Utc::now();
        let doc = StoredDocument {
            key: key.to_string(),
            body,
            created_at: now,
            updated_at: now,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.key == key))
            .cloned())
    }

    async fn find_by_fields(
        &self,
        collection: Collection,
        fields: &[(&str, &Value)],
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|d| fields.iter().all(|(f, v)| d.body.get(*f) == Some(*v)))
            .cloned()
            .collect())
    }

    async fn list(&self, collection: Collection, offset: u64, limit: u64) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        body: Document,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        let Some(index) = docs.iter().position(|d| d.key == key) else {
            return Ok(None);
        };
        if let Some(name) = violated_key(collection, docs, &body, Some(key)) {
            return Err(StoreError::Duplicate {
                collection,
                unique_key: Some(name),
            });
        }

        let doc = &mut docs[index];
        doc.body = body;
        doc.updated_at = Utc::now().max(doc.created_at);
        Ok(Some(doc.clone()))
    }

    async fn remove(&self, collection: Collection, key: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.key != key);
        Ok(docs.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
