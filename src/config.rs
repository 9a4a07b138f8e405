//! Process configuration from environment variables (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/school_management";
pub const DEFAULT_SCHEMA: &str = "school";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Where documents live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub storage: StorageBackend,
    /// PostgreSQL schema holding the collection tables. From `SCHOOL_SCHEMA`.
    pub schema: String,
    pub max_connections: u32,
    /// How long a query waits for a pooled connection. From `DB_ACQUIRE_TIMEOUT_SECS`.
    pub acquire_timeout: Duration,
    pub bind_addr: String,
    pub port: u16,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from an explicit variable map; unset variables take their defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |k: &str| vars.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());
        Ok(AppConfig {
            database_url: get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            storage: get("STORAGE_BACKEND")
                .map(StorageBackend::from_str)
                .transpose()?
                .unwrap_or(StorageBackend::Postgres),
            schema: get("SCHOOL_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string(),
            max_connections: parse(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse(
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
            bind_addr: get("BIND_ADDR").unwrap_or("0.0.0.0").to_string(),
            port: parse(get("PORT"), "PORT", DEFAULT_PORT)?,
            body_limit: parse(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", crate::state::DEFAULT_BODY_LIMIT)?,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_addr, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: "BIND_ADDR",
            value: raw,
        })
    }
}

fn parse<T: FromStr>(raw: Option<&str>, var: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
            var,
            value: v.to_string(),
        }),
    }
}
