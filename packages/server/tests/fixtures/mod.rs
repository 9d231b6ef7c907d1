//! Shared fixtures for integration tests.
//!
//! Boots the router in-process on an ephemeral port.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use plaza_server::ui::{WEBSOCKET_PATH, serve, state::AppState};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_state(Arc::new(AppState::default())).await
    }

    pub async fn start_with_state(state: Arc<AppState>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.await;
            };
            if let Err(e) = serve(listener, state, shutdown).await {
                eprintln!("test server stopped: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}{}", self.addr, WEBSOCKET_PATH)
    }

    /// Poll `/api/topic` until the live connection count equals `expected`.
    pub async fn wait_for_connections(&self, expected: u64) {
        self.wait_for_topic_field("connections", expected).await;
    }

    /// Poll `/api/topic` until the broker's subscription count equals `expected`.
    pub async fn wait_for_subscriptions(&self, expected: u64) {
        self.wait_for_topic_field("subscriptions", expected).await;
    }

    async fn wait_for_topic_field(&self, field: &str, expected: u64) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/topic", self.base_url());
        let poll = async {
            loop {
                let body: Value = client
                    .get(&url)
                    .send()
                    .await
                    .expect("Failed to send request")
                    .json()
                    .await
                    .expect("Failed to parse JSON");
                if body[field].as_u64() == Some(expected) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        };
        timeout(TIMEOUT, poll)
            .await
            .unwrap_or_else(|_| panic!("{field} never reached {expected}"));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn connect(server: &TestServer) -> WsStream {
    let (ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect WebSocket");
    ws
}

pub async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::text(value.to_string()))
        .await
        .expect("Failed to send frame");
}

pub async fn send_raw(ws: &mut WsStream, text: &str) {
    ws.send(Message::text(text.to_string()))
        .await
        .expect("Failed to send frame");
}

pub async fn join(ws: &mut WsStream, name: &str) {
    send_json(
        ws,
        serde_json::json!({"route": "chat.addUser", "payload": {"sender": name, "type": "JOIN"}}),
    )
    .await;
}

pub async fn chat(ws: &mut WsStream, content: &str) {
    send_json(
        ws,
        serde_json::json!({"route": "chat.sendMessage", "payload": {"content": content, "type": "CHAT"}}),
    )
    .await;
}

/// Next broadcast event, skipping control frames.
pub async fn recv_event(ws: &mut WsStream) -> Value {
    let next = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<Value>(text.as_str())
                        .expect("Server sent invalid JSON");
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {e}"),
                None => panic!("WebSocket closed while waiting for an event"),
            }
        }
    };
    timeout(TIMEOUT, next)
        .await
        .expect("Timed out waiting for an event")
}

/// Assert that no event arrives within a short window.
pub async fn assert_silent(ws: &mut WsStream) {
    let result = timeout(Duration::from_millis(200), ws.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("unexpected event: {}", text.as_str());
    }
}

pub fn assert_event(event: &Value, kind: &str, sender: &str, content: &str) {
    assert_eq!(event["kind"], kind, "event: {event}");
    assert_eq!(event["sender"], sender, "event: {event}");
    assert_eq!(event["content"], content, "event: {event}");
    assert!(event["timestamp"].is_i64(), "event: {event}");
}
