use axum::{Json, extract::State};
use schoolmis_models::system::{DebugResponse, HealthResponse, RootResponse};

use crate::state::AppState;

use super::service::SystemService;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = RootResponse)),
    tag = "System"
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(SystemService::banner(&state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Liveness and store state", body = HealthResponse)),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(SystemService::health(&state))
}

#[utoipa::path(
    get,
    path = "/debug",
    responses((status = 200, description = "Connection diagnostics", body = DebugResponse)),
    tag = "System"
)]
pub async fn debug(State(state): State<AppState>) -> Json<DebugResponse> {
    Json(SystemService::debug(&state))
}
