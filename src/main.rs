use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use user_crud::infrastructure::{config::AppConfig, logger::Logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    Logger::init(&config.logging.level);

    info!("Starting user CRUD service...");

    let store = user_crud::build_store(&config.database)
        .await
        .map_err(|e| {
            error!("Failed to initialize storage: {e:#}");
            e
        })?;
    let state = user_crud::app_state(store);
    let app = user_crud::build_router(state, config.server.timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("🚀 User service running on http://{}", listener.local_addr()?);
    info!("📖 Endpoints:");
    info!("   GET    /health      - Health check");
    info!("   GET    /users       - List users");
    info!("   POST   /users       - Create user");
    info!("   GET    /users/:id   - Get user by ID");
    info!("   PUT    /users/:id   - Update user");
    info!("   DELETE /users/:id   - Delete user");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
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
                error!("failed to listen for SIGTERM: {e}");
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
