//! Lifecycle Monitor: reacts to transport connect/disconnect signals.

use std::sync::Arc;

use crate::{
    domain::{ChatEvent, ConnectionId, ConnectionRepository, RegistryError, TopicBroker},
    usecase::{ConnectParticipantUseCase, DisconnectParticipantUseCase},
};

/// Signals written by the transport layer, one pair per socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSignal {
    Connected(ConnectionId),
    Disconnected(ConnectionId),
}

pub struct LifecycleMonitor {
    connect: ConnectParticipantUseCase,
    disconnect: DisconnectParticipantUseCase,
}

impl LifecycleMonitor {
    pub fn new(repository: Arc<dyn ConnectionRepository>, broker: Arc<dyn TopicBroker>) -> Self {
        Self {
            connect: ConnectParticipantUseCase::new(repository.clone()),
            disconnect: DisconnectParticipantUseCase::new(repository, broker),
        }
    }

    /// Dispatch a transport signal.
    pub async fn handle(&self, signal: TransportSignal) -> Result<(), RegistryError> {
        match signal {
            TransportSignal::Connected(connection_id) => self.on_connect(connection_id).await,
            TransportSignal::Disconnected(connection_id) => {
                self.on_disconnect(&connection_id).await;
                Ok(())
            }
        }
    }

    /// Register a freshly opened connection. Publishes nothing.
    pub async fn on_connect(&self, connection_id: ConnectionId) -> Result<(), RegistryError> {
        let connection = self.connect.execute(connection_id).await?;
        tracing::info!("Received a new WebSocket connection '{}'", connection.id);
        Ok(())
    }

    /// Tear down a connection; publishes a LEAVE if it had joined.
    ///
    /// Idempotent: a second call for the same id publishes nothing.
    pub async fn on_disconnect(&self, connection_id: &ConnectionId) -> Option<ChatEvent> {
        let leave = self.disconnect.execute(connection_id).await;
        match &leave {
            Some(event) => tracing::info!(
                "User disconnected: '{}' ({})",
                event.sender,
                connection_id
            ),
            None => tracing::info!("Connection '{}' closed before joining", connection_id),
        }
        tracing::debug!(
            "{} connection(s) remain",
            self.disconnect.count_remaining_connections().await
        );
        leave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::EventKind,
        usecase::test_support::{create_test_backends, drain, id, name, outbound},
    };

    #[tokio::test]
    async fn test_connect_then_disconnect_without_join() {
        // テスト項目: JOIN せずに切断した接続はイベントを配信しない
        // given (前提条件):
        let (repository, broker) = create_test_backends();
        let monitor = LifecycleMonitor::new(repository.clone(), broker.clone());

        // when (操作):
        monitor.handle(TransportSignal::Connected(id("a"))).await.unwrap();
        assert_eq!(repository.count_connections().await, 1);
        let leave = monitor.on_disconnect(&id("a")).await;

        // then (期待する結果):
        assert!(leave.is_none());
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_of_joined_connection_notifies_others() {
        // テスト項目: 参加済みの接続が切断されると残りの購読者に LEAVE が届く
        // given (前提条件):
        let (repository, broker) = create_test_backends();
        let monitor = LifecycleMonitor::new(repository.clone(), broker.clone());
        monitor.on_connect(id("a")).await.unwrap();
        monitor.on_connect(id("b")).await.unwrap();
        repository.bind_identity(&id("b"), name("bob")).await.unwrap();
        let (out_a, mut rx_a) = outbound();
        let (out_b, _rx_b) = outbound();
        broker.subscribe(id("a"), out_a).await;
        broker.subscribe(id("b"), out_b).await;

        // when (操作):
        monitor
            .handle(TransportSignal::Disconnected(id("b")))
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut rx_a);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].kind, EventKind::Leave);
        assert_eq!(frames[0].sender, "bob");
    }

    #[tokio::test]
    async fn test_duplicate_connect_is_surfaced() {
        // テスト項目: 同じ ID の二重接続は呼び出し元にエラーとして返る
        let (repository, broker) = create_test_backends();
        let monitor = LifecycleMonitor::new(repository, broker);
        monitor.on_connect(id("a")).await.unwrap();

        let result = monitor.on_connect(id("a")).await;

        assert_eq!(
            result,
            Err(RegistryError::DuplicateConnection("a".to_string()))
        );
    }
}
