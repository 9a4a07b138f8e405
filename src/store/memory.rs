//! In-process document store. Backs the `memory` storage backend and the tests.

use super::{new_id, Document, DocumentStore, Fields};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Collection name -> (insertion sequence, id -> fields).
type Collections = HashMap<String, HashMap<String, (u64, Fields)>>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    seq: std::sync::atomic::AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn prepare(&self, collection: &str) -> Result<(), StoreError> {
        self.write()?.entry(collection.to_string()).or_default();
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|(_, fields)| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.read()?;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<_> = docs.iter().collect();
        rows.sort_by_key(|(_, (seq, _))| *seq);
        Ok(rows
            .into_iter()
            .map(|(id, (_, fields))| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let id = new_id();
        let seq = self.seq.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), (seq, fields.clone()));
        Ok(Document { id, fields })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.write()?;
        let Some((_, stored)) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };
        for (key, value) in fields {
            stored.insert(key, value);
        }
        Ok(Some(Document {
            id: id.to_string(),
            fields: stored.clone(),
        }))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|(_, fields)| Document {
                id: id.to_string(),
                fields,
            }))
    }
}
