//! WebSocket frame DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatEvent, EventKind};

/// Inbound frame sent by a client.
///
/// ```json
/// {"route": "chat.sendMessage", "payload": {"content": "hi"}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundFrame {
    pub route: String,
    #[serde(default)]
    pub payload: InboundPayload,
}

/// Body of an inbound frame. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundPayload {
    /// Advisory only; the route decides the event kind.
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Outbound frame, one per published event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEventDto {
    pub kind: EventKind,
    pub sender: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch) in JST
    pub timestamp: i64,
}

impl From<&ChatEvent> for ChatEventDto {
    fn from(event: &ChatEvent) -> Self {
        Self {
            kind: event.kind,
            sender: event.sender.as_str().to_string(),
            content: event.content.as_str().to_string(),
            timestamp: event.timestamp.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageContent, Timestamp};

    #[test]
    fn test_inbound_frame_without_payload() {
        // テスト項目: payload を省略したフレームも解析できる
        let frame: InboundFrame = serde_json::from_str(r#"{"route":"chat.addUser"}"#).unwrap();

        assert_eq!(frame.route, "chat.addUser");
        assert!(frame.payload.sender.is_none());
        assert!(frame.payload.content.is_none());
    }

    #[test]
    fn test_inbound_payload_accepts_type_alias() {
        // テスト項目: "type" フィールドも kind として受け付ける
        let frame: InboundFrame = serde_json::from_str(
            r#"{"route":"chat.sendMessage","payload":{"type":"CHAT","sender":"x","content":"hi"}}"#,
        )
        .unwrap();

        assert_eq!(frame.payload.kind.as_deref(), Some("CHAT"));
        assert_eq!(frame.payload.content.as_deref(), Some("hi"));
    }

    #[test]
    fn test_chat_event_dto_wire_shape() {
        // テスト項目: 送信フレームは kind / sender / content / timestamp を持つ
        // given (前提条件):
        let event = ChatEvent::chat(
            DisplayName::new("alice".to_string()).unwrap(),
            MessageContent::new("hi".to_string()).unwrap(),
            Timestamp::new(7),
        );

        // when (操作):
        let json = serde_json::to_value(ChatEventDto::from(&event)).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "CHAT",
                "sender": "alice",
                "content": "hi",
                "timestamp": 7
            })
        );
    }
}
