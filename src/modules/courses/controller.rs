use axum::{
    Json,
    extract::{Path, Query},
};
use schoolmis_core::AppError;
use schoolmis_db::Repository;
use schoolmis_models::common::{DeleteResponse, LevelScope};
use schoolmis_models::courses::{CreateCourseDto, Course, UpdateCourseDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(LevelScope),
    responses(
        (status = 200, description = "All courses, optionally filtered", body = Vec<Course>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_courses(
    store: ActiveStore,
    Query(scope): Query<LevelScope>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = Repository::<Course>::new(store.0.as_ref())
        .list(&scope.filter())
        .await
        .map_err(store_error)?;
    Ok(Json(courses))
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_course(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = Repository::<Course>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("courses");
    Ok(Json(course))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_course(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = Repository::<Course>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_course(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = Repository::<Course>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_course(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<Course>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("Course")))
}
