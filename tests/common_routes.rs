mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{broken_app, memory_app, send, send_request};
use school_api::{app, AppState, MemoryStore};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn health_is_always_healthy() {
    for app in [memory_app(), broken_app()] {
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));
    }
}

#[tokio::test]
async fn root_returns_welcome_text() {
    let (status, body) = send(&memory_app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("School Management APIs!"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, doc) = send(&memory_app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "School Management API");
    assert!(doc["paths"]["/students/{id}"]["put"].is_object());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/students")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send_request(&memory_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/teachers")
        .body(Body::from(r#"{"name":"x"}"#))
        .unwrap();
    let (status, body) = send_request(&memory_app(), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(memory_app(), request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn oversized_body_is_rejected_before_the_handler() {
    let app = app(AppState::new(Arc::new(MemoryStore::new())).with_body_limit(64));
    let body = json!({ "name": "x".repeat(200) }).to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/students")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let (status, _) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, list) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}
