//! Shared application state for all routes.

use crate::config::{ServerConfig, StoreBackend, ALL_ENTITIES};
use crate::error::AppError;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use chrono::FixedOffset;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Opened once at startup and closed at shutdown; shared by every request.
    pub store: Arc<dyn DocumentStore>,
    /// Zone used to stamp creation-time date/time defaults.
    pub school_offset: FixedOffset,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, school_offset: FixedOffset) -> Self {
        AppState {
            store,
            school_offset,
        }
    }

    /// Open the configured backend and provision its collections.
    pub async fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        let store: Arc<dyn DocumentStore> = match config.store_backend {
            StoreBackend::Postgres => {
                tracing::info!(schema = %config.db_schema, "using postgres document store");
                Arc::new(PgDocumentStore::connect(config, &ALL_ENTITIES).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory document store; data will not survive a restart");
                Arc::new(MemoryDocumentStore::new())
            }
        };
        Ok(AppState::new(store, config.school_offset))
    }
}
