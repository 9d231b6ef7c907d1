//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, Outbound},
    ui::{
        gateway::{GatewayError, GatewaySession},
        lifecycle::TransportSignal,
        state::AppState,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to assign connection id: {}", e);
            return;
        }
    };

    if let Err(e) = state
        .lifecycle
        .handle(TransportSignal::Connected(connection_id.clone()))
        .await
    {
        tracing::error!("Failed to register connection '{}': {}", connection_id, e);
        return;
    }

    let (outbound, mut outbound_rx) = Outbound::channel(state.outbound_capacity);
    let (mut sender, mut receiver) = socket.split();
    let mut session = GatewaySession::new(connection_id.clone(), outbound);
    let state_clone = state.clone();

    // Inbound: one frame at a time, so per-connection order is kept end to end
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", session.connection_id(), e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received frame from '{}': {}",
                        session.connection_id(),
                        text.as_str()
                    );
                    if let Err(e) = state_clone
                        .gateway
                        .handle_frame(&mut session, text.as_str())
                        .await
                    {
                        log_dropped_frame(session.connection_id(), &e);
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", session.connection_id());
                    session.close();
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Outbound: drain broker frames to the socket until evicted or the socket fails.
    // A write to a peer that stopped reading never completes, so it races the eviction.
    let writer_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            tokio::select! {
                biased;
                _ = outbound_rx.evicted() => break,
                result = sender.send(Message::Text(frame.into())) => {
                    if let Err(e) = result {
                        tracing::debug!("Failed to write to '{}': {}", writer_id, e);
                        break;
                    }
                }
            }
        }

        if outbound_rx.is_evicted() {
            // The peer is not reading; a close frame would block the same way
            tracing::warn!("Evicted slow subscriber '{}'", writer_id);
        } else if let Err(e) = sender.close().await {
            tracing::debug!("Failed to close socket for '{}': {}", writer_id, e);
        }
    });

    // If either half completes, stop the other and wait for it so that no
    // frame is still being handled during teardown
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if recv_finished {
        send_task.abort();
        let _ = send_task.await;
    } else {
        recv_task.abort();
        let _ = recv_task.await;
    }

    if let Err(e) = state
        .lifecycle
        .handle(TransportSignal::Disconnected(connection_id.clone()))
        .await
    {
        tracing::error!("Failed to tear down connection '{}': {}", connection_id, e);
    }
}

fn log_dropped_frame(connection_id: &ConnectionId, error: &GatewayError) {
    match error {
        GatewayError::ProtocolViolation(_) | GatewayError::MalformedMessage(_) => {
            tracing::warn!("Dropped frame from '{}': {}", connection_id, error);
        }
        GatewayError::Registry(_) => {
            tracing::error!("Registry rejected frame from '{}': {}", connection_id, error);
        }
    }
}
