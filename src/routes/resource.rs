//! Resource routes. Each resource is mounted under its own prefix with the same five
//! operations; class schedules add a lookup by class.

use crate::config::{EntitySchema, CLASS_SCHEDULE, ENQUIRY, SUBJECT};
use crate::handlers::resource::{
    create, delete as delete_handler, list, list_by_class, read, update, ResourceState,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub const CLASS_SCHEDULE_PREFIX: &str = "/api/schedule";
pub const SUBJECT_PREFIX: &str = "/api/subject";
pub const ENQUIRY_PREFIX: &str = "/api/enquiry";

fn crud_routes() -> Router<ResourceState> {
    Router::new()
        .route("/add", post(create))
        .route("/get", get(list))
        .route("/get/:id", get(read))
        .route("/update/:id", put(update))
        .route("/delete/:id", delete(delete_handler))
}

fn with_entity(router: Router<ResourceState>, state: AppState, entity: &'static EntitySchema) -> Router {
    router.with_state(ResourceState::new(state, entity))
}

pub fn class_schedule_routes(state: AppState) -> Router {
    let router = crud_routes().route("/class", get(list_by_class));
    with_entity(router, state, &CLASS_SCHEDULE)
}

pub fn subject_routes(state: AppState) -> Router {
    with_entity(crud_routes(), state, &SUBJECT)
}

pub fn enquiry_routes(state: AppState) -> Router {
    with_entity(crud_routes(), state, &ENQUIRY)
}

/// All three resources under their prefixes.
pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .nest(CLASS_SCHEDULE_PREFIX, class_schedule_routes(state.clone()))
        .nest(SUBJECT_PREFIX, subject_routes(state.clone()))
        .nest(ENQUIRY_PREFIX, enquiry_routes(state))
}
