//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::{
    error::RegistryError,
    value_object::{ConnectionId, DisplayName, MessageContent, Timestamp},
};

/// One live transport session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Identifier assigned by the transport layer
    pub id: ConnectionId,
    /// Display name, unset until a JOIN is processed
    pub bound_identity: Option<DisplayName>,
    /// Timestamp when the transport session opened
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a new connection with no bound identity
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            bound_identity: None,
            connected_at,
        }
    }

    /// Bind a display name to this connection.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyBound` if a name is already bound.
    /// The identity is immutable once set.
    pub fn bind_identity(&mut self, name: DisplayName) -> Result<(), RegistryError> {
        if let Some(bound) = &self.bound_identity {
            return Err(RegistryError::AlreadyBound {
                connection_id: self.id.as_str().to_string(),
                bound: bound.as_str().to_string(),
            });
        }
        self.bound_identity = Some(name);
        Ok(())
    }

    pub fn is_identified(&self) -> bool {
        self.bound_identity.is_some()
    }
}

/// Kind of a chat event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Chat,
    Join,
    Leave,
}

/// A unit of communication broadcast on the topic.
///
/// `sender` is a [`DisplayName`], so every published event carries a
/// non-empty sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub kind: EventKind,
    pub sender: DisplayName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatEvent {
    pub fn join(sender: DisplayName, timestamp: Timestamp) -> Self {
        Self {
            kind: EventKind::Join,
            sender,
            content: MessageContent::empty(),
            timestamp,
        }
    }

    pub fn chat(sender: DisplayName, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            kind: EventKind::Chat,
            sender,
            content,
            timestamp,
        }
    }

    /// LEAVE synthesized by the server when a joined connection drops.
    pub fn leave(sender: DisplayName, timestamp: Timestamp) -> Self {
        Self {
            kind: EventKind::Leave,
            sender,
            content: MessageContent::empty(),
            timestamp,
        }
    }
}
