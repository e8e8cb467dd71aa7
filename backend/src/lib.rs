pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use discoteca_storage::{CatalogStore, StorageConfig};

use crate::config::ServerConfig;
pub use crate::state::AppState;

/// Full application: routes plus request tracing and permissive CORS.
pub fn app(state: AppState) -> Router {
  routes::router(state).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}

pub async fn run() -> anyhow::Result<()> {
  // .env first so it can feed both the config paths and RUST_LOG
  dotenvy::dotenv().ok();

  let server = ServerConfig::load()?;
  telemetry::init_tracing(&server.log_filter);

  // --- Dependency wiring ---

  // 1. Persistence adapter (SQLite pool + schema)
  let storage = StorageConfig::load()?;
  let store = CatalogStore::open(&storage)?;

  // 2. HTTP surface
  let app = app(AppState::new(store));

  let listener = TcpListener::bind(server.socket_addr()).await?;
  info!(addr = %listener.local_addr()?, "discoteca listening");

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(error = %e, "failed to listen for ctrl-c");
    return;
  }
  info!("shutdown requested");
}
