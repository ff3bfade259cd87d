use axum::{Json, extract::State};
use schoolmis_models::system::StatsResponse;

use crate::docs::ErrorResponse;
use crate::middleware::auth::ActiveStore;
use crate::state::AppState;

use super::service::StatsService;

#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Student and school totals", body = StatsResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorResponse)
    ),
    tag = "Stats",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(State(state): State<AppState>, store: ActiveStore) -> Json<StatsResponse> {
    Json(StatsService::counts(store.0.as_ref(), state.memory()).await)
}
