//! Generic CRUD over one document collection.

use crate::error::{AppError, StoreError};
use crate::model::{Resource, ID_FIELD};
use crate::store::{Document, Fields, SharedStore};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Typed access to the collection of `T`. Cheap to clone; shares the store handle.
pub struct Repository<T> {
    store: SharedStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> Repository<T> {
    pub fn new(store: SharedStore) -> Self {
        Repository {
            store,
            _marker: PhantomData,
        }
    }

    /// Fetch one record. `NotFound` when the id is unknown.
    pub async fn find_by_id(&self, id: &str) -> Result<T, AppError> {
        let doc = self.store.find_by_id(T::COLLECTION, id).await?;
        decode(doc.ok_or_else(|| not_found::<T>(id))?)
    }

    /// Every record in the collection.
    pub async fn find_all(&self) -> Result<Vec<T>, AppError> {
        let docs = self.store.find_all(T::COLLECTION).await?;
        docs.into_iter().map(decode).collect()
    }

    /// Persist a new record built from `input`; the store assigns its id.
    pub async fn create(&self, input: T::Input) -> Result<T, AppError> {
        let fields = encode::<T, _>(&input)?;
        let doc = self.store.insert(T::COLLECTION, fields).await?;
        let record: T = decode(doc)?;
        tracing::debug!(collection = T::COLLECTION, id = %record.id(), "created");
        Ok(record)
    }

    /// Replace the supplied top-level fields of an existing record.
    pub async fn update_by_id(&self, id: &str, patch: T::Patch) -> Result<T, AppError> {
        let fields = encode::<T, _>(&patch)?;
        let doc = self.store.update_by_id(T::COLLECTION, id, fields).await?;
        decode(doc.ok_or_else(|| not_found::<T>(id))?)
    }

    /// Remove a record and return what it held.
    pub async fn delete_by_id(&self, id: &str) -> Result<T, AppError> {
        let doc = self.store.delete_by_id(T::COLLECTION, id).await?;
        let record: T = decode(doc.ok_or_else(|| not_found::<T>(id))?)?;
        tracing::debug!(collection = T::COLLECTION, id = %record.id(), "deleted");
        Ok(record)
    }
}

fn not_found<T: Resource>(id: &str) -> AppError {
    AppError::NotFound(format!("{} {}", T::KEY, id))
}

fn encode<T: Resource, P: Serialize>(payload: &P) -> Result<Fields, AppError> {
    match serde_json::to_value(payload).map_err(StoreError::Codec)? {
        Value::Object(mut fields) => {
            fields.remove(ID_FIELD);
            Ok(fields)
        }
        _ => Err(StoreError::NotAnObject(format!("{} payload", T::KEY)).into()),
    }
}

fn decode<T: Resource>(doc: Document) -> Result<T, AppError> {
    let id = doc.id.clone();
    serde_json::from_value(doc.into_value(ID_FIELD)).map_err(|e| {
        tracing::error!(collection = T::COLLECTION, id = %id, error = %e, "stored document does not decode");
        AppError::Storage(StoreError::Codec(e))
    })
}
