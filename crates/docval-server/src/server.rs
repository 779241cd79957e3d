//! Router construction and the listener loop

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use docval_core::Catalog;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::{Error, Result};

/// Build the application router for `config`.
pub fn build_router(catalog: Arc<Catalog>, config: &ServerConfig) -> Router {
    let state = AppState::new(catalog, config);
    Router::new()
        .route(&config.route, post(api::validate))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until ctrl-c.
pub async fn run(config: ServerConfig, catalog: Catalog) -> Result<()> {
    let catalog = Arc::new(catalog);
    let app = build_router(Arc::clone(&catalog), &config);

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| Error::Bind {
            addr: config.listen,
            source,
        })?;

    tracing::info!(
        addr = %config.listen,
        route = %config.route,
        execution = %config.execution,
        max_parallel = config.max_parallel,
        deadline_ms = ?config.deadline_ms,
        checks = catalog.len(),
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown requested");
}
