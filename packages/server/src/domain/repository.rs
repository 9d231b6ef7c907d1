//! Repository and broker abstractions.
//!
//! The use-case layer depends on these traits, not on the in-memory
//! implementations in `infrastructure` (依存性の逆転).

use async_trait::async_trait;

use super::{
    ChatEvent, Connection, ConnectionId, DisplayName, Outbound, error::RegistryError,
};

/// Connection Registry: live connections and the identity bound to each.
///
/// Implementations must be safe under concurrent calls from independent
/// connections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Add a connection with no bound identity.
    ///
    /// Fails with `DuplicateConnection` if the id is already present.
    async fn register(&self, connection: Connection) -> Result<(), RegistryError>;

    /// Bind a display name to an existing, unbound connection.
    ///
    /// Fails with `UnknownConnection` or `AlreadyBound`.
    async fn bind_identity(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<(), RegistryError>;

    /// Remove a connection and return the identity it was bound to.
    ///
    /// Unknown ids are a no-op returning `None`, so a double disconnect
    /// never fails.
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// Snapshot of every live connection.
    async fn list_connections(&self) -> Vec<Connection>;

    async fn count_connections(&self) -> usize;
}

/// Topic Broker: fanout of events to every subscribed connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicBroker: Send + Sync {
    /// Add a connection to the fanout set, replacing any previous handle.
    async fn subscribe(&self, connection_id: ConnectionId, outbound: Outbound);

    /// Remove a connection from the fanout set. Unknown ids are a no-op.
    async fn unsubscribe(&self, connection_id: &ConnectionId);

    /// Deliver `event` to every current subscriber and return how many
    /// accepted it.
    ///
    /// A failed send to one subscriber never fails the publish; that
    /// subscriber is evicted instead.
    async fn publish(&self, event: ChatEvent) -> usize;

    async fn subscriber_count(&self) -> usize;
}
