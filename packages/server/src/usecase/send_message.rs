//! UseCase: メッセージ送信処理
//!
//! 送信者の識別名は Repository に記録されたものを使います。
//! クライアントがフレームに書いた sender は信用しません。

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, ConnectionRepository, MessageContent, Timestamp, TopicBroker,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ConnectionRepository>,
    broker: Arc<dyn TopicBroker>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>, broker: Arc<dyn TopicBroker>) -> Self {
        Self { repository, broker }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 配信した CHAT イベント
    /// * `Err(SendMessageError::NotJoined)` - 識別名が設定されていない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatEvent, SendMessageError> {
        let sender = self
            .repository
            .identity_of(connection_id)
            .await
            .ok_or_else(|| SendMessageError::NotJoined(connection_id.to_string()))?;

        let event = ChatEvent::chat(sender, content, Timestamp::now());
        self.broker.publish(event.clone()).await;

        Ok(event)
    }
}
