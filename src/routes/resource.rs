//! The five CRUD routes of one resource, mounted at `/{collection}`.

use crate::handlers::resource::{create, delete as delete_handler, list, read, update};
use crate::model::Resource;
use crate::service::Repository;
use axum::{routing::get, Router};

pub fn resource_routes<T: Resource>(repo: Repository<T>) -> Router {
    let collection = format!("/{}", T::COLLECTION);
    let item = format!("/{}/:id", T::COLLECTION);
    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(&item, get(read::<T>).put(update::<T>).delete(delete_handler::<T>))
        .with_state(repo)
}
