//! Generic CRUD over one entity's collection. Every operation issues a single store call,
//! except delete, which also reports how many records remain.

use crate::config::EntitySchema;
use crate::error::AppError;
use crate::service::defaults::apply_defaults;
use crate::service::RequestValidator;
use crate::store::{Document, DocumentStore, Fields};
use chrono::{FixedOffset, Utc};
use uuid::Uuid;

pub struct CrudService;

impl CrudService {
    /// Sanitize, default, validate and insert. Null values count as absent.
    pub async fn create(
        store: &dyn DocumentStore,
        entity: &EntitySchema,
        body: Fields,
        offset: FixedOffset,
    ) -> Result<Document, AppError> {
        let mut fields = RequestValidator::sanitize(entity, body)?;
        fields.retain(|_, v| !v.is_null());
        apply_defaults(entity, &mut fields, Utc::now(), offset);
        RequestValidator::validate(entity, &fields)?;
        let doc = store.insert(entity.collection, fields).await?;
        tracing::info!(entity = entity.label, id = %doc.id, "record created");
        Ok(doc)
    }

    /// All records in insertion order. An empty collection is not an error.
    pub async fn list(store: &dyn DocumentStore, entity: &EntitySchema) -> Result<Vec<Document>, AppError> {
        store.find_all(entity.collection).await
    }

    pub async fn read(
        store: &dyn DocumentStore,
        entity: &EntitySchema,
        id: Uuid,
    ) -> Result<Document, AppError> {
        store
            .find_by_id(entity.collection, id)
            .await?
            .ok_or_else(|| not_found(entity, &id.to_string()))
    }

    /// Exact-match lookup on one declared field. No matches is reported as not found.
    pub async fn list_by_field(
        store: &dyn DocumentStore,
        entity: &EntitySchema,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError> {
        if entity.field(field).is_none() {
            return Err(AppError::BadRequest(format!("unknown field: {}", field)));
        }
        let docs = store.find_by_field(entity.collection, field, value).await?;
        if docs.is_empty() {
            return Err(AppError::NotFound(format!(
                "no {} found for {} '{}'",
                entity.plural, field, value
            )));
        }
        Ok(docs)
    }

    /// Partial overwrite: only supplied fields change. Null values count as absent, so they
    /// neither clear a field nor fail validation. Returns the updated record.
    pub async fn update(
        store: &dyn DocumentStore,
        entity: &EntitySchema,
        id: Uuid,
        body: Fields,
    ) -> Result<Document, AppError> {
        let checked = RequestValidator::sanitize(entity, body).and_then(|mut patch| {
            patch.retain(|_, v| !v.is_null());
            RequestValidator::validate_partial(entity, &patch).map(|_| patch)
        });
        let patch = match checked {
            Ok(patch) => patch,
            // A missing record outranks a bad patch.
            Err(err) => {
                if store.find_by_id(entity.collection, id).await?.is_none() {
                    return Err(not_found(entity, &id.to_string()));
                }
                return Err(err);
            }
        };
        let doc = store
            .update_by_id(entity.collection, id, patch)
            .await?
            .ok_or_else(|| not_found(entity, &id.to_string()))?;
        tracing::info!(entity = entity.label, %id, "record updated");
        Ok(doc)
    }

    /// Remove one record. Returns it with the number of records left in the collection.
    pub async fn delete(
        store: &dyn DocumentStore,
        entity: &EntitySchema,
        id: Uuid,
    ) -> Result<(Document, u64), AppError> {
        let doc = store
            .delete_by_id(entity.collection, id)
            .await?
            .ok_or_else(|| not_found(entity, &id.to_string()))?;
        let remaining = store.count(entity.collection).await?;
        tracing::info!(entity = entity.label, %id, remaining, "record deleted");
        Ok((doc, remaining))
    }
}

pub fn not_found(entity: &EntitySchema, id: &str) -> AppError {
    AppError::NotFound(format!("{} not found: {}", entity.label, id))
}
