//! Document collections: the persistence seam behind every resource.
//!
//! A document is a flat JSON object keyed by a store-assigned identifier.
//! Updates are shallow: each supplied top-level key replaces the stored one.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, qualified_table, PgStore};

use crate::config::{AppConfig, StorageBackend};
use crate::error::{AppError, ConfigError, StoreError};
use crate::model::{Resource, Student, Teacher};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub type Fields = Map<String, Value>;

/// A stored document: identifier plus its field map (without the identifier).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Flatten into one JSON object with the identifier under `id_field`.
    pub fn into_value(self, id_field: &str) -> Value {
        let mut map = self.fields;
        map.insert(id_field.to_string(), Value::String(self.id));
        Value::Object(map)
    }
}

/// Shared handle injected into every repository.
pub type SharedStore = Arc<dyn DocumentStore>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Make the collection ready to use (create table, etc.). Idempotent.
    async fn prepare(&self, collection: &str) -> Result<(), StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Store `fields` under a freshly generated identifier and return the stored document.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Shallow-merge `fields` into the document. `None` when the id is unknown.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove the document and return its last state. `None` when the id is unknown.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
}

/// Fresh identifier for a new document.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Open the configured backend and prepare both collections. Called once at startup;
/// the returned handle is shared by every request.
///
/// An unreachable database does not stop startup: the failure is logged, the pool
/// connects lazily, and requests report storage errors until it comes back. Only a
/// malformed `DATABASE_URL` is fatal.
pub async fn open_store(cfg: &AppConfig) -> Result<SharedStore, AppError> {
    let store: SharedStore = match cfg.storage {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Postgres => {
            match ensure_database_exists(&cfg.database_url).await {
                Ok(()) => {}
                Err(e @ AppError::Config(_)) => return Err(e),
                Err(e) => tracing::error!(error = %e, "database unreachable at startup"),
            }
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(cfg.max_connections)
                .acquire_timeout(cfg.acquire_timeout)
                .connect_lazy(&cfg.database_url)
                .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
            Arc::new(PgStore::new(pool, cfg.schema.clone()))
        }
    };
    for collection in [Student::COLLECTION, Teacher::COLLECTION] {
        if let Err(e) = store.prepare(collection).await {
            tracing::error!(collection = %collection, error = %e, "collection not prepared; retrying on first use");
        }
    }
    tracing::info!(backend = ?cfg.storage, "document store ready");
    Ok(store)
}
