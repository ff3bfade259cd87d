use axum::{
    Json,
    extract::{Path, Query},
};
use schoolmis_core::AppError;
use schoolmis_db::Repository;
use schoolmis_models::classes::{CreateClassDto, SchoolClass, UpdateClassDto};
use schoolmis_models::common::{DeleteResponse, LevelScope};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/classes",
    params(LevelScope),
    responses(
        (status = 200, description = "All classes, optionally filtered", body = Vec<SchoolClass>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_classes(
    store: ActiveStore,
    Query(scope): Query<LevelScope>,
) -> Result<Json<Vec<SchoolClass>>, AppError> {
    let classes = Repository::<SchoolClass>::new(store.0.as_ref())
        .list(&scope.filter())
        .await
        .map_err(store_error)?;
    Ok(Json(classes))
}

#[utoipa::path(
    post,
    path = "/api/v1/classes",
    request_body = CreateClassDto,
    responses(
        (status = 200, description = "Class created", body = SchoolClass),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_class(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<Json<SchoolClass>, AppError> {
    let class = Repository::<SchoolClass>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("classes");
    Ok(Json(class))
}

#[utoipa::path(
    get,
    path = "/api/v1/classes/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = SchoolClass),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_class(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<SchoolClass>, AppError> {
    let class = Repository::<SchoolClass>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(class))
}

#[utoipa::path(
    put,
    path = "/api/v1/classes/{id}",
    params(("id" = String, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = SchoolClass),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_class(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<SchoolClass>, AppError> {
    let class = Repository::<SchoolClass>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(class))
}

#[utoipa::path(
    delete,
    path = "/api/v1/classes/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_class(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<SchoolClass>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("Class")))
}
