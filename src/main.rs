use dotenvy::dotenv;
use schoolmis::logging::init_tracing;
use schoolmis::metrics::init_metrics;
use schoolmis::router::init_router;
use schoolmis::state::init_app_state;
use schoolmis_config::LogConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing(&LogConfig::from_env())?;

    let state = init_app_state().await;
    let monitor = state.stores.monitor().clone();
    let address = state.server_config.bind_address();
    let metrics = init_metrics(state.server_config.metrics_enabled);

    info!(
        environment = %state.server_config.environment,
        source = if state.stores.ready_state().is_connected() { "mongodb" } else { "memory" },
        "Starting School MIS API"
    );

    let app = init_router(state, metrics);
    let listener = TcpListener::bind(&address).await?;

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    monitor.mark_disconnecting();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
