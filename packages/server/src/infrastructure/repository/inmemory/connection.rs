//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRepository, DisplayName, RegistryError,
};

/// インメモリ Connection Repository 実装
///
/// 接続 ID から Connection への対応を単一の Mutex で保護します。
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn register(&self, connection: Connection) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.id) {
            return Err(RegistryError::DuplicateConnection(
                connection.id.into_string(),
            ));
        }
        connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn bind_identity(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        let connection = connections
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::UnknownConnection(connection_id.to_string()))?;
        connection.bind_identity(name)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut connections = self.connections.lock().await;
        connections
            .remove(connection_id)
            .and_then(|connection| connection.bound_identity)
    }

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let connections = self.connections.lock().await;
        connections
            .get(connection_id)
            .and_then(|connection| connection.bound_identity.clone())
    }

    async fn list_connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        connections.values().cloned().collect()
    }

    async fn count_connections(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
