//! Response bodies and the per-route error contract.
//!
//! Each route reports failures with its own status, body key and wording, so an
//! [`AppError`] only becomes a response once the [`Operation`] is known.

use crate::error::AppError;
use crate::model::Resource;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// The five resource routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Read,
    List,
    Create,
    Update,
    Delete,
}

/// Top-level key of an error body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKey {
    Message,
    Error,
}

impl BodyKey {
    fn as_str(self) -> &'static str {
        match self {
            BodyKey::Message => "message",
            BodyKey::Error => "error",
        }
    }
}

/// An error ready to be sent: `{ <key>: <message> }` with `status`.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub key: BodyKey,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, key: BodyKey, message: impl Into<String>) -> Self {
        ApiError {
            status,
            key,
            message: message.into(),
        }
    }

    /// Map a service error raised while serving `op` on resource `T`.
    pub fn for_operation<T: Resource>(op: Operation, err: AppError) -> Self {
        let not_found = format!("{} not found", T::LABEL);
        match (&err, op) {
            (AppError::NotFound(_), Operation::Read | Operation::Update) => {
                ApiError::new(StatusCode::NOT_FOUND, BodyKey::Message, not_found)
            }
            (AppError::NotFound(_), Operation::Delete) => {
                ApiError::new(StatusCode::NOT_FOUND, BodyKey::Error, not_found)
            }
            _ => {
                tracing::error!(resource = T::KEY, operation = ?op, error = %err, "request failed");
                internal::<T>(op)
            }
        }
    }
}

fn internal<T: Resource>(op: Operation) -> ApiError {
    let (key, message) = match op {
        Operation::Read => (BodyKey::Error, T::FETCH_FAILED.to_string()),
        Operation::List => (BodyKey::Error, "Internal server error".to_string()),
        Operation::Create => (BodyKey::Error, "Internal Server Error".to_string()),
        Operation::Update => (BodyKey::Message, "Server error".to_string()),
        Operation::Delete => (BodyKey::Error, "Internal server error".to_string()),
    };
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, key, message)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert(self.key.as_str().to_string(), Value::String(self.message));
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// `{ "message": <message>, <key>: <record> }`, as returned by get-one and delete.
pub fn labelled<T: Serialize>(message: String, key: &str, record: &T) -> Result<Json<Value>, serde_json::Error> {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(message));
    body.insert(key.to_string(), serde_json::to_value(record)?);
    Ok(Json(Value::Object(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{Student, Teacher};

    fn storage() -> AppError {
        AppError::Storage(StoreError::Poisoned("boom".into()))
    }

    #[test]
    fn not_found_wording_and_key_follow_the_route() {
        let read = ApiError::for_operation::<Teacher>(Operation::Read, AppError::NotFound("x".into()));
        assert_eq!(read, ApiError::new(StatusCode::NOT_FOUND, BodyKey::Message, "Teacher not found"));

        let update = ApiError::for_operation::<Student>(Operation::Update, AppError::NotFound("x".into()));
        assert_eq!(update.key, BodyKey::Message);

        let delete = ApiError::for_operation::<Student>(Operation::Delete, AppError::NotFound("x".into()));
        assert_eq!(delete, ApiError::new(StatusCode::NOT_FOUND, BodyKey::Error, "Student not found"));
    }

    #[test]
    fn storage_failures_are_generic_500s() {
        let cases = [
            (Operation::Read, BodyKey::Error, "Failed to fetch student"),
            (Operation::List, BodyKey::Error, "Internal server error"),
            (Operation::Create, BodyKey::Error, "Internal Server Error"),
            (Operation::Update, BodyKey::Message, "Server error"),
            (Operation::Delete, BodyKey::Error, "Internal server error"),
        ];
        for (op, key, message) in cases {
            let err = ApiError::for_operation::<Student>(op, storage());
            assert_eq!(err, ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, key, message));
        }
    }

    #[test]
    fn teacher_read_failure_keeps_capitalized_label() {
        let err = ApiError::for_operation::<Teacher>(Operation::Read, storage());
        assert_eq!(err.message, "Failed to fetch Teacher");
    }

    #[test]
    fn labelled_body_wraps_record_under_key() {
        let Json(body) = labelled("Student found".into(), "student", &serde_json::json!({ "name": "Asha" })).unwrap();
        assert_eq!(body["message"], "Student found");
        assert_eq!(body["student"]["name"], "Asha");
    }
}
