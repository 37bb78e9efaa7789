// server.rs — Wire the store, service, and router together and serve.

use std::sync::Arc;

use gt_goal::{GoalService, GoalStore, JsonlGoalStore, MemoryGoalStore};

use crate::api::{self, AppState};
use crate::config::{DaemonConfig, GtConfig, StorageBackend};
use crate::error::DaemonError;

/// Build the goal service for a project according to `config`.
pub fn build_service(paths: &GtConfig, config: &DaemonConfig) -> Result<GoalService, DaemonError> {
    let store: Arc<dyn GoalStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(JsonlGoalStore::new(&paths.goals_file)?),
        StorageBackend::Memory => Arc::new(MemoryGoalStore::new()),
    };

    Ok(GoalService::new(store))
}

/// Serve the goal API until Ctrl-C.
pub async fn serve(paths: GtConfig, config: DaemonConfig) -> Result<(), DaemonError> {
    let service = build_service(&paths, &config)?;
    let cors = api::cors_layer(&config.server.cors_origins)?;
    let app = api::router(AppState::new(service)).layer(cors);

    let addr_text = format!("{}:{}", config.server.host, config.server.port);
    let io_error = |source: std::io::Error| DaemonError::Io {
        path: addr_text.clone(),
        source,
    };

    let listener = tokio::net::TcpListener::bind(&addr_text)
        .await
        .map_err(io_error)?;
    let addr = listener.local_addr().map_err(io_error)?;

    tracing::info!("Goal API listening on http://{}", addr);
    match config.storage.backend {
        StorageBackend::File => tracing::info!("Goal store: {}", paths.goals_file.display()),
        StorageBackend::Memory => tracing::info!("Goal store: in memory"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(io_error)?;

    tracing::info!("Goal API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
