//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Topic summary for the topic endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummaryDto {
    pub topic: String,
    /// Live transport connections, joined or not
    pub connections: usize,
    /// Connections currently in the broker's fanout set
    pub subscriptions: usize,
    pub subscribers: Vec<SubscriberDto>,
}

/// Identified connection listed in the topic summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberDto {
    pub sender: String,
    pub connected_at: String, // ISO 8601
}
