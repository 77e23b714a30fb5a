use std::sync::Arc;

use anyhow::Result;
use axum::routing::post;
use axum::Router;
use tracing::info;

use crate::config::settings::ServerConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::ingest;
use crate::sinks::aep::AepForwarder;

#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<AepForwarder>,
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(metrics: &Metrics, forwarder: Arc<AepForwarder>) -> Self {
        Self {
            forwarder,
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

/// Build the relay router: the ingest route plus the metrics route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(ingest::handle_event))
        .merge(state.metrics_state.router())
        .with_state(state)
}

/// Start one Axum server serving the ingest and metrics routes.
pub async fn start(server_config: &ServerConfig, state: AppState) -> Result<()> {
    let app = router(state);

    let bind_addr = format!("{}:{}", server_config.host, server_config.port);
    info!("listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    let metrics = get_metrics().await;
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
