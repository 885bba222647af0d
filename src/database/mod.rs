pub mod collection;
pub mod memory;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod store;

use std::sync::Arc;

use tracing::{error, info};

use crate::config::{DatabaseConfig, StorageBackend};

pub use collection::{Collection, UniqueKey};
pub use memory::MemoryStore;
pub use pagination::{ListQuery, Page, PageRequest, Pagination};
pub use postgres::PgDocumentStore;
pub use repository::Repository;
pub use store::{Document, DocumentStore, StoreError, StoredDocument};

/// Open the configured store once at boot.
///
/// A Postgres server that cannot be reached is logged and otherwise ignored: the
/// service still starts, each request reports the outage on its own, and the schema
/// bootstrap runs again on the first request that reaches the server.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory document store (data is not persisted)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| StoreError::Backend("DATABASE_URL is not set".to_string()))?;
            let store = PgDocumentStore::connect_lazy(url, config)?;
            match store.ensure_ready().await {
                Ok(()) => info!("Connected to document store"),
                Err(e) => {
                    error!("Unable to connect to document store: {}", e);
                }
            }
            Ok(Arc::new(store))
        }
    }
}
