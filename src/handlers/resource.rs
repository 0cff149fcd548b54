//! Resource CRUD handlers: add, list, read, update, delete, and lookup by class.
//! One set of handlers serves every entity; the router's state says which.

use crate::config::EntitySchema;
use crate::error::AppError;
use crate::extractors::RecordId;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::Fields;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Router state for one resource: the shared app state plus the entity it serves.
#[derive(Clone)]
pub struct ResourceState {
    pub app: AppState,
    pub entity: &'static EntitySchema,
}

impl ResourceState {
    pub fn new(app: AppState, entity: &'static EntitySchema) -> Self {
        ResourceState { app, entity }
    }
}

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Fields, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn create(
    State(state): State<ResourceState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let record = CrudService::create(
        state.app.store.as_ref(),
        state.entity,
        body,
        state.app.school_offset,
    )
    .await?;
    Ok(response::created(state.entity, record))
}

pub async fn list(State(state): State<ResourceState>) -> Result<impl IntoResponse, AppError> {
    let records = CrudService::list(state.app.store.as_ref(), state.entity).await?;
    Ok(response::success_many(state.entity, records))
}

pub async fn read(
    State(state): State<ResourceState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let record = CrudService::read(state.app.store.as_ref(), state.entity, id).await?;
    Ok(response::success_one(record))
}

/// GET /class?class=X
pub async fn list_by_class(
    State(state): State<ResourceState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let class = params
        .get("class")
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter 'class' is required".into()))?;
    let records =
        CrudService::list_by_field(state.app.store.as_ref(), state.entity, "class", class).await?;
    Ok(response::success_many(state.entity, records))
}

pub async fn update(
    State(state): State<ResourceState>,
    RecordId(id): RecordId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let record = CrudService::update(state.app.store.as_ref(), state.entity, id, body).await?;
    Ok(response::success_one(record))
}

pub async fn delete(
    State(state): State<ResourceState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let (record, remaining) = CrudService::delete(state.app.store.as_ref(), state.entity, id).await?;
    Ok(response::removed(state.entity, record, remaining))
}
