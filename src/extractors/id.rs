//! Extract a record id from the `:id` path segment.

use crate::error::AppError;
use crate::handlers::resource::ResourceState;
use crate::service::not_found;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// A well-formed record id. Malformed ids are rejected as not found, since no record
/// can ever carry them.
#[derive(Clone, Copy, Debug)]
pub struct RecordId(pub Uuid);

#[async_trait]
impl FromRequestParts<ResourceState> for RecordId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ResourceState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Uuid::parse_str(raw.trim())
            .map(RecordId)
            .map_err(|_| not_found(state.entity, &raw))
    }
}
