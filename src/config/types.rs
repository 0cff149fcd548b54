//! Runtime configuration types.

use std::str::FromStr;

use chrono::FixedOffset;

use crate::error::ConfigError;

/// Which document store backs the collections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: String,
    /// Postgres schema holding one table per collection.
    pub db_schema: String,
    pub max_connections: u32,
    /// Fixed zone used to stamp Subject date/time defaults.
    pub school_offset: FixedOffset,
    pub max_body_bytes: usize,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/school_admin";
pub const DEFAULT_DB_SCHEMA: &str = "school_admin";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHOOL_OFFSET: &str = "+05:30";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
