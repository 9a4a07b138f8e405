//! Typed JSON body extractor. Rejections use the same `{ "error": ... }` shape as every other failure.

use crate::response::{ApiError, BodyKey};
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Request body deserialized into `T`. Bodies that are not valid JSON, not an object,
/// or carry a field of the wrong type never reach the handler.
#[derive(Clone, Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), reason = %rejection.body_text(), "payload rejected");
                Err(ApiError::new(rejection.status(), BodyKey::Error, rejection.body_text()))
            }
        }
    }
}
