//! Typed errors for configuration, storage, and the resource services.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("unknown storage backend '{0}' (expected 'postgres' or 'memory')")]
    UnknownBackend(String),
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

/// Failures raised by a document store. Always surfaced to clients as 500.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("document codec: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("collection lock poisoned: {0}")]
    Poisoned(String),
    #[error("{0} is not a JSON object")]
    NotAnObject(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage: {0}")]
    Storage(#[from] StoreError),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Storage(StoreError::Db(e))
    }
}
