use axum::{Json, extract::Path};
use schoolmis_core::AppError;
use schoolmis_db::{Filter, Repository};
use schoolmis_models::common::DeleteResponse;
use schoolmis_models::schools::{CreateSchoolDto, School, UpdateSchoolDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::metrics::track_record_created;
use crate::middleware::auth::ActiveStore;
use crate::utils::store_error;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/schools",
    responses(
        (status = 200, description = "All schools", body = Vec<School>),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_schools(store: ActiveStore) -> Result<Json<Vec<School>>, AppError> {
    let schools = Repository::<School>::new(store.0.as_ref())
        .list(&Filter::new())
        .await
        .map_err(store_error)?;
    Ok(Json(schools))
}

#[utoipa::path(
    post,
    path = "/api/v1/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 200, description = "School created", body = School),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn create_school(
    store: ActiveStore,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = Repository::<School>::new(store.0.as_ref())
        .create(&dto)
        .await
        .map_err(store_error)?;
    track_record_created("schools");
    Ok(Json(school))
}

#[utoipa::path(
    get,
    path = "/api/v1/schools/{id}",
    params(("id" = String, Path, description = "School ID")),
    responses(
        (status = 200, description = "School details", body = School),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn get_school(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<School>, AppError> {
    let school = Repository::<School>::new(store.0.as_ref())
        .get(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(school))
}

#[utoipa::path(
    put,
    path = "/api/v1/schools/{id}",
    params(("id" = String, Path, description = "School ID")),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store, dto))]
pub async fn update_school(
    store: ActiveStore,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = Repository::<School>::new(store.0.as_ref())
        .update(&id, &dto)
        .await
        .map_err(store_error)?;
    Ok(Json(school))
}

#[utoipa::path(
    delete,
    path = "/api/v1/schools/{id}",
    params(("id" = String, Path, description = "School ID")),
    responses(
        (status = 200, description = "School deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(store))]
pub async fn delete_school(
    store: ActiveStore,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Repository::<School>::new(store.0.as_ref())
        .delete(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DeleteResponse::for_entity("School")))
}
