//! FCI Student Portal API
//!
//! HTTP REST API over the catalog and user services, plus profile picture
//! uploads and OpenAPI documentation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod uploads;

use std::net::SocketAddr;

use tracing::{info, warn};

use common::Database;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;
use crate::uploads::UploadStore;

/// Run the HTTP server with the given configuration until shutdown.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let uploads = UploadStore::new(&config.uploads);
    uploads.ensure_dir().await?;
    info!(dir = %uploads.dir().display(), "Upload directory ready");

    let db = Database::connect(&config.database).await?;
    db.ping().await?;
    info!(config = ?config.database, "Connected to database");

    let catalog = catalog_service_lib::build_service(db.get_connection());
    let users = user_service_lib::build_service(db.get_connection());
    let state = AppState::new(catalog, users, uploads);

    let app = create_router(state);

    let addr: SocketAddr = config.server.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = db.close().await {
        warn!(error = %e, "Failed to close database pool");
    }
    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting shutdown");
        }
    }
}
