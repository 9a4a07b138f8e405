//! Record types stored in the document collections, plus their input schemas.
//!
//! Each record type implements [`Resource`], which is everything the generic
//! repository, handlers and OpenAPI builder need to serve it.

mod student;
mod teacher;

pub use student::{NewStudent, Student, StudentPatch};
pub use teacher::{ContactInformation, NewTeacher, Teacher, TeacherPatch};

use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

/// Field name the store identifier is serialized under.
pub const ID_FIELD: &str = "_id";

/// A record kind with its own collection and route prefix.
pub trait Resource: Serialize + DeserializeOwned + ToSchema + Send + Sync + 'static {
    /// Payload accepted on create. Every field has an explicit default.
    type Input: Serialize + DeserializeOwned + ToSchema + Send + 'static;
    /// Payload accepted on update. Absent fields must be skipped when serialized.
    type Patch: Serialize + DeserializeOwned + ToSchema + Send + 'static;

    /// Collection (table) name and route segment, e.g. `students`.
    const COLLECTION: &'static str;
    /// Key the record is wrapped under in labelled responses, e.g. `student`.
    const KEY: &'static str;
    /// Capitalized name used in messages, e.g. `Student`.
    const LABEL: &'static str;
    /// OpenAPI tag, e.g. `Students`.
    const TAG: &'static str;
    /// Body of a 500 on get-one. The casing differs per resource.
    const FETCH_FAILED: &'static str;

    fn id(&self) -> &str;
}
