//! Application state: one repository per resource over a shared store handle.

use crate::model::{Student, Teacher};
use crate::service::Repository;
use crate::store::SharedStore;

/// Default request body limit (1 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub students: Repository<Student>,
    pub teachers: Repository<Teacher>,
    pub body_limit: usize,
}

impl AppState {
    /// Build repositories over `store`. The store is constructed by the caller, so tests
    /// can hand each case its own instance.
    pub fn new(store: SharedStore) -> Self {
        AppState {
            students: Repository::new(store.clone()),
            teachers: Repository::new(store),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}
