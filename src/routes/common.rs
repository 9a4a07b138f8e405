//! Common routes: welcome text, health, and the OpenAPI document.

use crate::docs;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::openapi::OpenApi;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn welcome() -> &'static str {
    "School Management APIs!"
}

/// Never touches storage, so it answers even when the database is down.
async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "healthy" })
}

async fn openapi() -> Json<OpenApi> {
    Json(docs::openapi())
}

/// Common routes (no state): GET /, GET /health, GET /api-docs/openapi.json.
pub fn common_routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
}
