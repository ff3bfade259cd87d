use axum::{
    Json,
    extract::{Path, Query},
};
use schoolmis_core::AppError;
use schoolmis_db::Repository;
use schoolmis_models::common::{DeleteResponse, SchoolScope};
use schoolmis_models::levels::{CreateLevelDto, Level, UpdateLevelDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/levels",
    params(SchoolScope),
    responses(
        (status = 200, description = "All levels, optionally filtered", body = Vec<Level>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Levels",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_levels(
    store: ActiveStore,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Vec<Level>>, AppError> {
    let levels = Repository::<Level>::new(store.0.as_ref())
        .list(&scope.filter())
        .await
        .map_err(store_error)?;
    Ok(Json(levels))
}

#[utoipa::path(
    post,
    path = "/api/v1/levels",
    request_body = CreateLevelDto,
    responses(
        (status = 200, description = "Level created", body = Level),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Levels",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_level(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateLevelDto>,
) -> Result<Json<Level>, AppError> {
    let level = Repository::<Level>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("levels");
    Ok(Json(level))
}

#[utoipa::path(
    get,
    path = "/api/v1/levels/{id}",
    params(("id" = String, Path, description = "Level ID")),
    responses(
        (status = 200, description = "Level details", body = Level),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Level not found", body = ErrorResponse)
    ),
    tag = "Levels",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_level(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<Level>, AppError> {
    let level = Repository::<Level>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(level))
}

#[utoipa::path(
    put,
    path = "/api/v1/levels/{id}",
    params(("id" = String, Path, description = "Level ID")),
    request_body = UpdateLevelDto,
    responses(
        (status = 200, description = "Level updated", body = Level),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Level not found", body = ErrorResponse)
    ),
    tag = "Levels",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_level(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateLevelDto>,
) -> Result<Json<Level>, AppError> {
    let level = Repository::<Level>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(level))
}

#[utoipa::path(
    delete,
    path = "/api/v1/levels/{id}",
    params(("id" = String, Path, description = "Level ID")),
    responses(
        (status = 200, description = "Level deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Level not found", body = ErrorResponse)
    ),
    tag = "Levels",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_level(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<Level>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("Level")))
}
