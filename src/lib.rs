//! School administration backend: CRUD over class schedules, subjects and enquiries,
//! backed by a document store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{EntitySchema, ServerConfig, StoreBackend, CLASS_SCHEDULE, ENQUIRY, SUBJECT};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, resource_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{Document, DocumentStore, MemoryDocumentStore, PgDocumentStore};
