//! School management REST backend: student and teacher records in a document store.

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{ContactInformation, NewStudent, NewTeacher, Resource, Student, StudentPatch, Teacher, TeacherPatch};
pub use routes::app;
pub use service::Repository;
pub use state::AppState;
pub use store::{open_store, DocumentStore, MemoryStore, PgStore, SharedStore};
