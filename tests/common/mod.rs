#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use school_api::store::{Document, Fields};
use school_api::{app, AppState, DocumentStore, MemoryStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A fresh application over its own in-memory store.
pub fn memory_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

/// An application whose store fails every call.
pub fn broken_app() -> Router {
    app(AppState::new(Arc::new(BrokenStore)))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub struct BrokenStore;

fn down() -> StoreError {
    StoreError::Poisoned("storage offline".into())
}

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn prepare(&self, _collection: &str) -> Result<(), StoreError> {
        Err(down())
    }

    async fn find_by_id(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        Err(down())
    }

    async fn find_all(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(down())
    }

    async fn insert(&self, _collection: &str, _fields: Fields) -> Result<Document, StoreError> {
        Err(down())
    }

    async fn update_by_id(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<Option<Document>, StoreError> {
        Err(down())
    }

    async fn delete_by_id(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        Err(down())
    }
}
