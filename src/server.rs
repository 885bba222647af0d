use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::database;
use crate::router;
use crate::state::AppState;

/// Run the HTTP server until Ctrl-C or SIGTERM, then close the store.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting Student Management API in {:?} mode", config.environment);
    info!("Storage backend: {:?}", config.database.backend);

    if config.security.jwt_secret.is_empty() {
        if config.is_production() {
            error!("JWT_SECRET is not set; every protected request will be rejected");
        } else {
            warn!("JWT_SECRET is not set; every protected request will be rejected");
        }
    }

    let store = database::connect(&config.database).await?;

    let bind_addr = format!("{}:{}", config.server.hostname, config.server.port);
    let state = AppState::new(Arc::clone(&store), config);
    let app = router::app(state);
    info!("Routes registered: /, /health, /api/auth, /api/student, /api/enrollment, /api/subject");

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped, closing document store");
    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
