//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod outbound;
pub mod repository;
pub mod value_object;

pub use entity::{ChatEvent, Connection, EventKind};
pub use error::{RegistryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use outbound::{DEFAULT_OUTBOUND_CAPACITY, DeliveryError, Outbound, OutboundReceiver};
pub use repository::{ConnectionRepository, TopicBroker};
pub use value_object::{ConnectionId, DisplayName, MessageContent, Timestamp};

#[cfg(test)]
pub use repository::{MockConnectionRepository, MockTopicBroker};

/// The single broadcast destination every identified connection subscribes to.
pub const PUBLIC_TOPIC: &str = "/topic/public";
