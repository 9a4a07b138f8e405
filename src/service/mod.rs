//! Resource services: one generic repository per record type.

mod repository;
pub use repository::Repository;
