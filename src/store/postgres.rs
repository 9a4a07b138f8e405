//! PostgreSQL document store. Each collection is a table in the schema from `SCHOOL_SCHEMA`
//! holding one JSONB payload per identifier.

use super::{new_id, Document, DocumentStore, Fields};
use crate::error::{AppError, ConfigError, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{ConnectOptions, PgPool};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// Collections are prepared on first use when startup could not reach the database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
    prepared: Arc<RwLock<HashSet<String>>>,
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified, quoted table name for a collection (e.g. `"school"."students"`).
pub fn qualified_table(schema: &str, collection: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(collection))
}

fn to_document(id: String, payload: Value) -> Result<Document, StoreError> {
    match payload {
        Value::Object(fields) => Ok(Document { id, fields }),
        _ => Err(StoreError::NotAnObject(format!("document {}", id))),
    }
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
            prepared: Arc::default(),
        }
    }

    async fn ready(&self, collection: &str) -> Result<(), StoreError> {
        let done = self
            .prepared
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?
            .contains(collection);
        if done {
            return Ok(());
        }
        self.prepare(collection).await
    }

    fn table(&self, collection: &str) -> String {
        qualified_table(&self.schema, collection)
    }

    async fn fetch_one(
        &self,
        sql: &str,
        id: &str,
        payload: Option<Fields>,
    ) -> Result<Option<Document>, StoreError> {
        tracing::debug!(sql = %sql, id = %id, "query");
        let mut query = sqlx::query_as::<_, (String, Value)>(sql).bind(id);
        if let Some(fields) = payload {
            query = query.bind(Value::Object(fields));
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(|(id, payload)| to_document(id, payload)).transpose()
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn prepare(&self, collection: &str) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                payload JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table(collection)
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        self.prepared
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?
            .insert(collection.to_string());
        tracing::debug!(collection = %collection, schema = %self.schema, "collection ready");
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.ready(collection).await?;
        let sql = format!("SELECT id, payload FROM {} WHERE id = $1", self.table(collection));
        self.fetch_one(&sql, id, None).await
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.ready(collection).await?;
        let sql = format!(
            "SELECT id, payload FROM {} ORDER BY created_at, id",
            self.table(collection)
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<(String, Value)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, payload)| to_document(id, payload))
            .collect()
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        self.ready(collection).await?;
        let sql = format!(
            "INSERT INTO {} (id, payload, created_at, updated_at) VALUES ($1, $2, NOW(), NOW()) RETURNING id, payload",
            self.table(collection)
        );
        let id = new_id();
        self.fetch_one(&sql, &id, Some(fields))
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError> {
        self.ready(collection).await?;
        // jsonb `||` replaces top-level keys only.
        let sql = format!(
            "UPDATE {} SET payload = payload || $2, updated_at = NOW() WHERE id = $1 RETURNING id, payload",
            self.table(collection)
        );
        self.fetch_one(&sql, id, Some(fields)).await
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.ready(collection).await?;
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, payload",
            self.table(collection)
        );
        self.fetch_one(&sql, id, None).await
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
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
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}
