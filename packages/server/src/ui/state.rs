//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRepository, DEFAULT_OUTBOUND_CAPACITY, TopicBroker},
    infrastructure::{broker::InMemoryTopicBroker, repository::InMemoryConnectionRepository},
    ui::{gateway::MessageGateway, lifecycle::LifecycleMonitor},
};

/// Shared application state
pub struct AppState {
    /// Connection Registry（データアクセス層の抽象化）
    pub repository: Arc<dyn ConnectionRepository>,
    /// Topic Broker
    pub broker: Arc<dyn TopicBroker>,
    pub gateway: MessageGateway,
    pub lifecycle: LifecycleMonitor,
    /// Frames buffered per connection before it is evicted
    pub outbound_capacity: usize,
}

impl AppState {
    /// State backed by the in-memory registry and broker.
    pub fn new(outbound_capacity: usize) -> Self {
        Self::with_backends(
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(InMemoryTopicBroker::new()),
            outbound_capacity,
        )
    }

    pub fn with_backends(
        repository: Arc<dyn ConnectionRepository>,
        broker: Arc<dyn TopicBroker>,
        outbound_capacity: usize,
    ) -> Self {
        Self {
            gateway: MessageGateway::new(repository.clone(), broker.clone()),
            lifecycle: LifecycleMonitor::new(repository.clone(), broker.clone()),
            repository,
            broker,
            outbound_capacity,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_OUTBOUND_CAPACITY)
    }
}
