use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::auth::require_token;
use crate::modules::auth::init_auth_router;
use crate::modules::classes::init_classes_router;
use crate::modules::courses::init_courses_router;
use crate::modules::levels::init_levels_router;
use crate::modules::schools::init_schools_router;
use crate::modules::stats::init_stats_router;
use crate::modules::students::init_students_router;
use crate::modules::system::init_system_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use schoolmis_config::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application. `/metrics` is mounted only when a recorder
/// handle is passed in.
pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let gate = || middleware::from_fn_with_state(state.clone(), require_token);

    let api = Router::new()
        .nest("/auth", init_auth_router())
        .nest("/schools", init_schools_router().route_layer(gate()))
        .nest("/students", init_students_router().route_layer(gate()))
        .nest("/teachers", init_teachers_router().route_layer(gate()))
        .nest("/classes", init_classes_router().route_layer(gate()))
        .nest("/levels", init_levels_router().route_layer(gate()))
        .nest("/courses", init_courses_router().route_layer(gate()))
        .nest("/stats", init_stats_router().route_layer(gate()));

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_system_router())
        .nest("/api/v1", api)
        .with_state(state.clone());

    if let Some(handle) = metrics {
        app = app
            .merge(metrics_app(handle))
            .layer(middleware::from_fn(metrics_middleware));
    }

    app.layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer
        .allow_origin(allowed_origins)
        .allow_credentials(true)
}
