mod config;
mod room;
mod signaling;

pub use config::*;
pub use room::*;
pub use signaling::*;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::info;

/// Relay routes: one WebSocket per `(room, client)` pair.
pub fn router(service: RelayService) -> Router {
    Router::new()
        .route("/ws/{room}/{client}", get(ws_handler))
        .with_state(service)
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind relay on {}", config.bind_addr))?;

    serve_on(listener, RelayService::new()).await
}

pub async fn serve_on(listener: TcpListener, service: RelayService) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Signaling relay listening on ws://{}", addr);

    axum::serve(listener, router(service))
        .await
        .context("Relay server stopped")?;
    Ok(())
}
