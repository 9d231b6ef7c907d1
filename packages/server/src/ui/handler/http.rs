//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use plaza_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::PUBLIC_TOPIC,
    infrastructure::dto::http::{SubscriberDto, TopicSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Summary of the public topic: live connections and joined identities
pub async fn topic_summary(State(state): State<Arc<AppState>>) -> Json<TopicSummaryDto> {
    let connections = state.repository.list_connections().await;
    let total = connections.len();

    let mut subscribers: Vec<SubscriberDto> = connections
        .into_iter()
        .filter_map(|connection| {
            let sender = connection.bound_identity?;
            Some(SubscriberDto {
                sender: sender.into_string(),
                connected_at: timestamp_to_jst_rfc3339(connection.connected_at.value()),
            })
        })
        .collect();

    // Sort by name for consistent ordering
    subscribers.sort_by(|a, b| a.sender.cmp(&b.sender));

    Json(TopicSummaryDto {
        topic: PUBLIC_TOPIC.to_string(),
        connections: total,
        subscriptions: state.broker.subscriber_count().await,
        subscribers,
    })
}
