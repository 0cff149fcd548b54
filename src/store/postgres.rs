//! PostgreSQL-backed document store. Each collection is a table in the configured schema
//! (default `school_admin`) holding a JSONB payload per document.

use super::{Document, DocumentStore, Fields};
use crate::config::{EntitySchema, ServerConfig};
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

type DocumentRow = (Uuid, Value, DateTime<Utc>, DateTime<Utc>);

const RETURNING: &str = "id, payload, created_at, updated_at";

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgDocumentStore {
            pool,
            schema: schema.into(),
        }
    }

    /// Create the database if needed, open the pool, and provision one table per entity.
    pub async fn connect(config: &ServerConfig, entities: &[&EntitySchema]) -> Result<Self, AppError> {
        ensure_database_exists(&config.database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        let store = PgDocumentStore::new(pool, config.db_schema.clone());
        store.ensure_collections(entities).await?;
        Ok(store)
    }

    /// Idempotent: CREATE SCHEMA / TABLE / INDEX IF NOT EXISTS.
    pub async fn ensure_collections(&self, entities: &[&EntitySchema]) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema)))
            .execute(&self.pool)
            .await?;

        for entity in entities {
            let table = self.table(entity.collection);
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY,
                    seq BIGSERIAL NOT NULL,
                    payload JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                table
            );
            sqlx::query(&ddl).execute(&self.pool).await?;

            let index = quoted(&format!("{}_seq_idx", entity.collection));
            sqlx::query(&format!("CREATE INDEX IF NOT EXISTS {} ON {} (seq)", index, table))
                .execute(&self.pool)
                .await?;
            tracing::info!(collection = entity.collection, "collection ready");
        }
        Ok(())
    }

    fn table(&self, collection: &str) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(collection))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, AppError> {
        let sql = format!(
            "INSERT INTO {} (id, payload) VALUES ($1, $2) RETURNING {}",
            self.table(collection),
            RETURNING
        );
        tracing::debug!(sql = %sql, "query");
        let row: DocumentRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(Value::Object(fields))
            .fetch_one(&self.pool)
            .await?;
        Ok(row_to_document(row))
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY seq", RETURNING, self.table(collection));
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", RETURNING, self.table(collection));
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_document))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE payload ->> $1 = $2 ORDER BY seq",
            RETURNING,
            self.table(collection)
        );
        tracing::debug!(sql = %sql, field, value, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Fields,
    ) -> Result<Option<Document>, AppError> {
        // `||` merges top-level keys, so fields absent from the patch keep their values.
        let sql = format!(
            "UPDATE {} SET payload = payload || $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            self.table(collection),
            RETURNING
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(Value::Object(patch))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_document))
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            self.table(collection),
            RETURNING
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_document))
    }

    async fn count(&self, collection: &str) -> Result<u64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table(collection));
        let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_document((id, payload, created_at, updated_at): DocumentRow) -> Document {
    let fields = match payload {
        Value::Object(map) => map,
        _ => Fields::new(),
    };
    Document {
        id,
        fields,
        created_at,
        updated_at,
    }
}

/// Quote identifier for PostgreSQL (names come from static entity definitions and validated config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}
