//! InMemory Topic Broker 実装
//!
//! 購読者の送信キューを HashMap で保持し、publish ごとに全購読者へ配送します。
//! publish 中は購読者集合のロックを保持するため、一回の publish の配送は
//! 他の publish と混ざりません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatEvent, ConnectionId, Outbound, PUBLIC_TOPIC, TopicBroker},
    infrastructure::dto::websocket::ChatEventDto,
};

/// インメモリ Topic Broker 実装
#[derive(Default)]
pub struct InMemoryTopicBroker {
    subscribers: Mutex<HashMap<ConnectionId, Outbound>>,
}

impl InMemoryTopicBroker {
    /// 新しい InMemoryTopicBroker を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicBroker for InMemoryTopicBroker {
    async fn subscribe(&self, connection_id: ConnectionId, outbound: Outbound) {
        let mut subscribers = self.subscribers.lock().await;
        tracing::debug!("'{}' subscribed to {}", connection_id, PUBLIC_TOPIC);
        subscribers.insert(connection_id, outbound);
    }

    async fn unsubscribe(&self, connection_id: &ConnectionId) {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers.remove(connection_id).is_some() {
            tracing::debug!("'{}' unsubscribed from {}", connection_id, PUBLIC_TOPIC);
        }
    }

    async fn publish(&self, event: ChatEvent) -> usize {
        let frame = match serde_json::to_string(&ChatEventDto::from(&event)) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode {:?} event: {}", event.kind, e);
                return 0;
            }
        };

        let mut subscribers = self.subscribers.lock().await;
        let mut delivered = 0;
        let mut failed = Vec::new();

        for (connection_id, outbound) in subscribers.iter() {
            match outbound.try_deliver(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to deliver {:?} to '{}': {}. Evicting subscriber",
                        event.kind,
                        connection_id,
                        e
                    );
                    outbound.evict();
                    failed.push(connection_id.clone());
                }
            }
        }

        for connection_id in failed {
            subscribers.remove(&connection_id);
        }

        tracing::debug!(
            "Published {:?} from '{}' to {} subscriber(s) on {}",
            event.kind,
            event.sender,
            delivered,
            PUBLIC_TOPIC
        );
        delivered
    }

    async fn subscriber_count(&self) -> usize {
        let subscribers = self.subscribers.lock().await;
        subscribers.len()
    }
}
