use std::marker::PhantomData;
use std::sync::Arc;

use crate::database::pagination::PageRequest;
use crate::database::store::{DocumentStore, StoreError, StoredDocument};
use crate::models::{from_document, to_document, Entity, Record};

/// Typed access to one collection. Cheap to clone; all clones share the store.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn create(&self, entity: &T) -> Result<Record<T>, StoreError> {
        let body = to_document(entity).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let stored = self.store.insert(T::COLLECTION, &entity.key(), body).await?;
        decode(stored)
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<Record<T>>, StoreError> {
        self.store.get(T::COLLECTION, key).await?.map(decode).transpose()
    }

    /// One page in insertion order, plus the collection's total count.
    pub async fn find_page(&self, request: &PageRequest) -> Result<(Vec<Record<T>>, u64), StoreError> {
        let total = self.store.count(T::COLLECTION).await?;
        let docs = self
            .store
            .list(T::COLLECTION, request.offset(), request.limit)
            .await?;
        let records = docs.into_iter().map(decode).collect::<Result<Vec<_>, _>>()?;
        Ok((records, total))
    }

    pub async fn update(&self, key: &str, entity: &T) -> Result<Option<Record<T>>, StoreError> {
        let body = to_document(entity).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.store
            .replace(T::COLLECTION, key, body)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.store.remove(T::COLLECTION, key).await
    }

    /// Conflict message when `entity` would collide with a document other than
    /// `existing_key`: its own key first, then each unique key of the collection.
    ///
    /// This is a pre-check; the store enforces the same constraints on write.
    pub async fn find_conflict(
        &self,
        entity: &T,
        existing_key: Option<&str>,
    ) -> Result<Option<&'static str>, StoreError> {
        let collection = T::COLLECTION;
        let key = entity.key();

        if existing_key != Some(key.as_str()) && self.store.get(collection, &key).await?.is_some() {
            return Ok(Some(collection.key_conflict_message()));
        }

        let body = to_document(entity).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        for unique in collection.unique_keys() {
            let fields: Option<Vec<(&str, &serde_json::Value)>> = unique
                .fields
                .iter()
                .map(|f| body.get(*f).filter(|v| !v.is_null()).map(|v| (*f, v)))
                .collect();
            let Some(fields) = fields else {
                continue;
            };
            let matches = self.store.find_by_fields(collection, &fields).await?;
            if matches.iter().any(|doc| Some(doc.key.as_str()) != existing_key) {
                return Ok(Some(unique.message));
            }
        }
        Ok(None)
    }
}

fn decode<T: Entity>(stored: StoredDocument) -> Result<Record<T>, StoreError> {
    let key = stored.key;
    let entity = from_document(stored.body)
        .map_err(|e| StoreError::Corrupt(format!("{} {}: {}", T::COLLECTION, key, e)))?;
    Ok(Record {
        entity,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    })
}
