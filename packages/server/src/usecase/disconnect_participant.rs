//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 登録解除、購読解除、LEAVE の合成と配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断で残りの購読者に LEAVE が一件届く
//! - エッジケース：JOIN 前の切断（配信なし）、二重切断（二回目は何もしない）

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRepository, Timestamp, TopicBroker};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn ConnectionRepository>,
    broker: Arc<dyn TopicBroker>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>, broker: Arc<dyn TopicBroker>) -> Self {
        Self { repository, broker }
    }

    /// 切断を実行
    ///
    /// 購読を先に解除するので、LEAVE は残りの購読者にだけ届きます。
    ///
    /// # Returns
    ///
    /// * `Some(ChatEvent)` - 配信した LEAVE イベント
    /// * `None` - 識別名がなかった（JOIN 前の切断、または既に切断済み）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<ChatEvent> {
        // 1. Repository から削除
        let identity = self.repository.unregister(connection_id).await;

        // 2. 購読解除（未購読でも何もしない）
        self.broker.unsubscribe(connection_id).await;

        // 3. 識別名があれば LEAVE を合成して配信
        let event = ChatEvent::leave(identity?, Timestamp::now());
        self.broker.publish(event.clone()).await;

        Some(event)
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.repository.count_connections().await
    }
}
