//! OpenAPI document for the whole API.
//!
//! Schemas come from the `ToSchema` derives on the record and payload types. Resource
//! paths are built from each [`Resource`] so both resources document the same contract.

use crate::model::{
    ContactInformation, NewStudent, NewTeacher, Resource, Student, StudentPatch, Teacher, TeacherPatch,
};
use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::schema::{Array, Schema};
use utoipa::openapi::{ContentBuilder, PathsBuilder, Ref, RefOr, Required, Response, ResponseBuilder};
use utoipa::{OpenApi, PartialSchema, ToSchema};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Management API",
        version = "1.0.0",
        description = "API documentation for the School Management system"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local server"),
        (url = "https://schoolmanagementapis.onrender.com", description = "Production server")
    ),
    components(schemas(
        Student,
        NewStudent,
        StudentPatch,
        Teacher,
        NewTeacher,
        TeacherPatch,
        ContactInformation
    )),
    tags(
        (name = "Students", description = "Student records"),
        (name = "Teachers", description = "Teacher records")
    )
)]
struct ApiDoc;

/// Build the complete document.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let paths = PathsBuilder::new()
        .path(
            "/",
            PathItemBuilder::new()
                .operation(
                    HttpMethod::Get,
                    OperationBuilder::new()
                        .summary(Some("Welcome message"))
                        .description(Some("Returns a welcome message for the School Management API"))
                        .response("200", response("Welcome message")),
                )
                .build(),
        )
        .path(
            "/health",
            PathItemBuilder::new()
                .operation(
                    HttpMethod::Get,
                    OperationBuilder::new()
                        .summary(Some("Health Check"))
                        .description(Some("Check the health status of the application"))
                        .response("200", response("Application is healthy")),
                )
                .build(),
        );
    let paths = resource_paths::<Teacher>(resource_paths::<Student>(paths));
    doc.paths = paths.build();
    doc
}

fn resource_paths<T: Resource>(paths: PathsBuilder) -> PathsBuilder {
    let key = T::KEY;
    let label = T::LABEL;
    let plural = T::COLLECTION;

    let collection = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            OperationBuilder::new()
                .summary(Some(format!("Get all {}", plural)))
                .tag(T::TAG)
                .response("200", json_response(&format!("A list of {}", plural), list_of::<T>()))
                .response("500", response("Internal server error")),
        )
        .operation(
            HttpMethod::Post,
            OperationBuilder::new()
                .summary(Some(format!("Create a new {}", key)))
                .tag(T::TAG)
                .request_body(Some(json_body(schema_ref::<T::Input>())))
                .response(
                    "201",
                    json_response(&format!("{} created successfully", label), schema_ref::<T>()),
                )
                .response("500", response("Internal server error")),
        )
        .build();

    let item = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            OperationBuilder::new()
                .summary(Some(format!("Get a {} by ID", key)))
                .tag(T::TAG)
                .parameter(id_param(key))
                .response("200", response(&format!("{} found", label)))
                .response("404", response(&format!("{} not found", label)))
                .response("500", response(T::FETCH_FAILED)),
        )
        .operation(
            HttpMethod::Put,
            OperationBuilder::new()
                .summary(Some(format!("Update a {} by ID", key)))
                .tag(T::TAG)
                .parameter(id_param(key))
                .request_body(Some(json_body(schema_ref::<T::Patch>())))
                .response(
                    "200",
                    json_response(&format!("{} updated successfully", label), schema_ref::<T>()),
                )
                .response("404", response(&format!("{} not found", label)))
                .response("500", response("Server error")),
        )
        .operation(
            HttpMethod::Delete,
            OperationBuilder::new()
                .summary(Some(format!("Delete a {} by ID", key)))
                .tag(T::TAG)
                .parameter(id_param(key))
                .response("200", response(&format!("{} deleted successfully", label)))
                .response("404", response(&format!("{} not found", label)))
                .response("500", response("Internal server error")),
        )
        .build();

    paths
        .path(format!("/{}", plural), collection)
        .path(format!("/{}/{{id}}", plural), item)
}

fn schema_ref<S: ToSchema>() -> RefOr<Schema> {
    Ref::from_schema_name(S::name()).into()
}

fn list_of<T: Resource>() -> RefOr<Schema> {
    RefOr::T(Schema::Array(Array::new(schema_ref::<T>())))
}

fn id_param(key: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("The {} ID", key)))
        .schema(Some(String::schema()))
        .build()
}

fn json_body(schema: RefOr<Schema>) -> RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", ContentBuilder::new().schema(Some(schema)).build())
        .required(Some(Required::True))
        .build()
}

fn response(description: &str) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", ContentBuilder::new().schema(Some(schema)).build())
        .build()
}
