use axum::{
    Json,
    extract::{Path, Query},
};
use schoolmis_core::AppError;
use schoolmis_db::Repository;
use schoolmis_models::common::{DeleteResponse, SchoolScope};
use schoolmis_models::teachers::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/teachers",
    params(SchoolScope),
    responses(
        (status = 200, description = "All teachers, optionally filtered", body = Vec<Teacher>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_teachers(
    store: ActiveStore,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = Repository::<Teacher>::new(store.0.as_ref())
        .list(&scope.filter())
        .await
        .map_err(store_error)?;
    Ok(Json(teachers))
}

#[utoipa::path(
    post,
    path = "/api/v1/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 200, description = "Teacher created", body = Teacher),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_teacher(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = Repository::<Teacher>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("teachers");
    Ok(Json(teacher))
}

#[utoipa::path(
    get,
    path = "/api/v1/teachers/{id}",
    params(("id" = String, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_teacher(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = Repository::<Teacher>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/api/v1/teachers/{id}",
    params(("id" = String, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_teacher(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = Repository::<Teacher>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/v1/teachers/{id}",
    params(("id" = String, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_teacher(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<Teacher>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("Teacher")))
}
