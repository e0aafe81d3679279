use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the store and bring the schema up to date.
pub async fn prepare_database(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!("database migrations applied");
    Ok(db)
}

/// Router with state attached, ready to serve.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = prepare_database(&cfg.database).await?;
    Ok(routes::build_router(ServerState { db }, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
