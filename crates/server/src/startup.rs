use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the repository backend from `database.url`: `memory://` or PostgreSQL (migrated on connect).
pub async fn build_state(db: &DatabaseConfig) -> Result<AppState, StartupError> {
    if db.is_memory() {
        warn!("using in-memory store; data is lost on exit");
        return Ok(AppState::in_memory());
    }
    let conn = models::db::connect_with_config(db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&conn, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrate up: {e}")))?;
    info!("migrations applied");
    Ok(AppState::seaorm(conn))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Compose store, services and router from a loaded config and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.database).await?;
    let app = build_app(state);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "starting http server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
