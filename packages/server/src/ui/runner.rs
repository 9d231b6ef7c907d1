//! Server runner: router construction and the serve loop.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::PUBLIC_TOPIC,
    ui::{
        handler::{health_check, topic_summary, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Path of the WebSocket endpoint.
pub const WEBSOCKET_PATH: &str = "/ws";

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBSOCKET_PATH, get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/topic", get(topic_summary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState::new(config.outbound_capacity));
    let listener = TcpListener::bind(config.bind_address()).await?;

    tracing::info!(
        "Listening on ws://{}{} (topic {})",
        listener.local_addr()?,
        WEBSOCKET_PATH,
        PUBLIC_TOPIC
    );

    serve(listener, state, shutdown_signal()).await?;
    Ok(())
}
