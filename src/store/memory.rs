//! Process-local document store. Used for tests and `STORE_BACKEND=memory`.

use super::{Document, DocumentStore, Fields};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Collections keyed by name; each Vec is kept in insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<Document>>>, AppError> {
        self.collections
            .read()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<Document>>>, AppError> {
        self.collections
            .write()
            .map_err(|_| AppError::Store("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, AppError> {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        Ok(self.read()?.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.get_str(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Fields,
    ) -> Result<Option<Document>, AppError> {
        let mut guard = self.write()?;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.fields.extend(patch);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let mut guard = self.write()?;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| d.id == id)
            .map(|idx| docs.remove(idx)))
    }

    async fn count(&self, collection: &str) -> Result<u64, AppError> {
        Ok(self.read()?.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn close(&self) {}
}
