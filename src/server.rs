//! HTTP server initialization and runtime setup.
//!
//! Handles redirect feed setup, the background loader and the Axum server lifecycle.

use crate::application::reload_worker::run_reload_worker;
use crate::application::services::RedirectService;
use crate::config::Config;
use crate::infrastructure::feed::CsvFileFeed;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - CSV redirect feed and an initially empty redirect table
/// - Background loader (initial load, then optional hot reload)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// The listener starts accepting before the table finishes loading; early
/// requests see an empty table and pass through.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let feed = Arc::new(CsvFileFeed::new(&config.redirects_csv_path));
    let redirect_service = Arc::new(RedirectService::new(feed));

    tokio::spawn(run_reload_worker(
        redirect_service.clone(),
        config.reload_interval(),
    ));
    tracing::info!("Redirect loader started");

    if !config.redirects_enabled {
        tracing::info!("Legacy redirects disabled (LEGACY_REDIRECTS_ENABLED is not set)");
    }

    let state = AppState::new(redirect_service, config.redirects_enabled);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
