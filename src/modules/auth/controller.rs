use axum::{Json, extract::State};
use schoolmis_core::AppError;
use schoolmis_models::auth::{LoginRequest, LoginResponse, LogoutResponse};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::ActiveStore;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, store, request))]
pub async fn login(
    State(state): State<AppState>,
    store: ActiveStore,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (username, password) = request.credentials();
    let response = AuthService::login(
        store.0.as_ref(),
        state.memory(),
        &state.auth_config,
        username,
        password,
    )
    .await?;
    Ok(Json(response))
}

/// Stateless; the token stays valid
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "Logout successful", body = LogoutResponse)),
    tag = "Authentication"
)]
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse::default())
}
