//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full application: common routes, both resources, CORS, body limit and request tracing.
pub fn app(state: AppState) -> Router {
    // The body limit sits outermost: CORS needs a `Default` response body from the service it wraps.
    Router::new()
        .merge(common_routes())
        .merge(resource_routes(state.students.clone()))
        .merge(resource_routes(state.teachers.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(state.body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
