//! Load server configuration from the process environment.

use chrono::FixedOffset;

use crate::config::types::*;
use crate::error::ConfigError;

impl ServerConfig {
    /// Read configuration from env vars (after loading `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Missing or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store_backend = match get("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => StoreBackend::default(),
        };

        let db_schema = get("SCHOOL_ADMIN_SCHEMA").unwrap_or_else(|| DEFAULT_DB_SCHEMA.into());
        if !is_identifier(&db_schema) {
            return Err(ConfigError::Invalid {
                key: "SCHOOL_ADMIN_SCHEMA",
                value: db_schema,
            });
        }

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DB_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let offset_raw = get("SCHOOL_TZ_OFFSET").unwrap_or_else(|| DEFAULT_SCHOOL_OFFSET.into());
        let school_offset = parse_offset(&offset_raw)?;

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "MAX_BODY_BYTES",
                value: v,
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(ServerConfig {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            store_backend,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            db_schema,
            max_connections,
            school_offset,
            max_body_bytes,
        })
    }
}

/// Parse a fixed UTC offset such as `+05:30` or `-08:00`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.parse::<FixedOffset>().map_err(|_| ConfigError::Invalid {
        key: "SCHOOL_TZ_OFFSET",
        value: raw.to_string(),
    })
}

/// Unquoted PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
