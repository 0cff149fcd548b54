//! Document store seam: one collection per entity, JSON documents with generated ids and
//! store-maintained timestamps.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_database_exists, PgDocumentStore};

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field name -> value for one document (ids and timestamps excluded).
pub type Fields = Map<String, Value>;

/// One persisted record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Persistence operations the resource handlers rely on. Each call is atomic for a single
/// document; nothing spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under a freshly generated id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, AppError>;

    /// All documents in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, AppError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError>;

    /// Documents whose text `field` equals `value` exactly, in insertion order.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError>;

    /// Overwrite the fields present in `patch`, keep the rest. Returns the updated document, or
    /// None if the id does not exist.
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Fields,
    ) -> Result<Option<Document>, AppError>;

    /// Remove a document. Returns it, or None if the id does not exist.
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError>;

    async fn count(&self, collection: &str) -> Result<u64, AppError>;

    /// Liveness check used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    /// Release connections. Called once at shutdown.
    async fn close(&self);
}
