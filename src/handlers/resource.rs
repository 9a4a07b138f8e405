//! Resource CRUD handlers, generic over the record type. Each one makes a single
//! repository call and shapes the result for its route.

use crate::error::{AppError, StoreError};
use crate::extractors::Payload;
use crate::model::Resource;
use crate::response::{labelled, ApiError, Operation};
use crate::service::Repository;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

fn fail<T: Resource>(op: Operation) -> impl FnOnce(AppError) -> ApiError {
    move |e| ApiError::for_operation::<T>(op, e)
}

fn codec<T: Resource>(op: Operation) -> impl FnOnce(serde_json::Error) -> ApiError {
    move |e| ApiError::for_operation::<T>(op, AppError::Storage(StoreError::Codec(e)))
}

/// GET /{resource}/:id
pub async fn read<T: Resource>(
    State(repo): State<Repository<T>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let record = repo.find_by_id(&id).await.map_err(fail::<T>(Operation::Read))?;
    labelled(format!("{} found", T::LABEL), T::KEY, &record).map_err(codec::<T>(Operation::Read))
}

/// GET /{resource}
pub async fn list<T: Resource>(State(repo): State<Repository<T>>) -> Result<Json<Vec<T>>, ApiError> {
    let records = repo.find_all().await.map_err(fail::<T>(Operation::List))?;
    Ok(Json(records))
}

/// POST /{resource}
pub async fn create<T: Resource>(
    State(repo): State<Repository<T>>,
    Payload(input): Payload<T::Input>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let record = repo.create(input).await.map_err(fail::<T>(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /{resource}/:id
pub async fn update<T: Resource>(
    State(repo): State<Repository<T>>,
    Path(id): Path<String>,
    Payload(patch): Payload<T::Patch>,
) -> Result<Json<T>, ApiError> {
    let record = repo
        .update_by_id(&id, patch)
        .await
        .map_err(fail::<T>(Operation::Update))?;
    Ok(Json(record))
}

/// DELETE /{resource}/:id
pub async fn delete<T: Resource>(
    State(repo): State<Repository<T>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let record = repo.delete_by_id(&id).await.map_err(fail::<T>(Operation::Delete))?;
    labelled(format!("{} deleted successfully", T::LABEL), T::KEY, &record)
        .map_err(codec::<T>(Operation::Delete))
}
