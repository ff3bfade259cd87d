use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{debug, health, root};

pub fn init_system_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/debug", get(debug))
}
