use axum::{
    Json,
    extract::{Path, Query},
};
use schoolmis_core::AppError;
use schoolmis_db::Repository;
use schoolmis_models::common::{DeleteResponse, SchoolScope};
use schoolmis_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(SchoolScope),
    responses(
        (status = 200, description = "All students, optionally filtered", body = Vec<Student>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_students(
    store: ActiveStore,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = Repository::<Student>::new(store.0.as_ref())
        .list(&scope.filter())
        .await
        .map_err(store_error)?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student created", body = Student),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_student(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = Repository::<Student>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("students");
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_student(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = Repository::<Student>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_student(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = Repository::<Student>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_student(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<Student>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("Student")))
}
