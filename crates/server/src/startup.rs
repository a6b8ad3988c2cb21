use std::{future::Future, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreKind};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::security::{Argon2Hasher, TokenConfig};
use service::uow::{memory::MemoryStore, seaorm::SeaOrmStore, Store};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config from `CONFIG_PATH` (default `config.toml`) when the file exists,
/// otherwise from environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = if Path::new(&path).exists() {
        AppConfig::load_and_validate()
    } else {
        info!(%path, "config file not found, using environment");
        AppConfig::from_env()
    };
    cfg.map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Open the configured store (running migrations for PostgreSQL) and assemble shared state.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let store: Arc<dyn Store> = match cfg.store {
        StoreKind::Memory => {
            warn!("using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
        StoreKind::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            info!("database migrated");
            Arc::new(SeaOrmStore::new(db))
        }
    };
    Ok(ServerState::new(store, Arc::new(Argon2Hasher::new()), TokenConfig::from(&cfg.jwt)))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Build the app and serve it until `shutdown` resolves.
pub async fn run(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, store = ?cfg.store, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
