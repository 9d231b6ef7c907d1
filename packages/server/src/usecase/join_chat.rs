//! UseCase: 参加（JOIN）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 識別名の設定、トピックへの購読、JOIN イベントの配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者自身を含む全購読者に JOIN が届く
//! - 異常系：未登録の接続、識別名の再設定

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, ConnectionRepository, DisplayName, Outbound, RegistryError,
    Timestamp, TopicBroker,
};

/// 参加のユースケース
pub struct JoinChatUseCase {
    repository: Arc<dyn ConnectionRepository>,
    broker: Arc<dyn TopicBroker>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>, broker: Arc<dyn TopicBroker>) -> Self {
        Self { repository, broker }
    }

    /// 参加を実行
    ///
    /// 識別名を設定してから購読し、その後で JOIN を配信します。
    /// そのため参加者自身も自分の JOIN を受け取ります。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 配信した JOIN イベント
    /// * `Err(RegistryError)` - 未登録 (`UnknownConnection`) または設定済み (`AlreadyBound`)
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
        outbound: Outbound,
    ) -> Result<ChatEvent, RegistryError> {
        // 1. 識別名を設定（失敗した場合は購読も配信もしない）
        self.repository
            .bind_identity(connection_id, name.clone())
            .await?;

        // 2. トピックに購読
        self.broker.subscribe(connection_id.clone(), outbound).await;

        // 3. JOIN を配信
        let event = ChatEvent::join(name, Timestamp::now());
        self.broker.publish(event.clone()).await;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, EventKind, MockConnectionRepository, MockTopicBroker},
        usecase::test_support::{create_test_backends, drain, id, name, outbound},
    };

    #[tokio::test]
    async fn test_join_success() {
        // テスト項目: JOIN で識別名が設定され、参加者自身と既存の購読者に JOIN が届く
        // given (前提条件): bob は参加済み、alice は接続のみ
        let (repository, broker) = create_test_backends();
        let usecase = JoinChatUseCase::new(repository.clone(), broker.clone());
        for s in ["a", "b"] {
            repository
                .register(Connection::new(id(s), Timestamp::new(0)))
                .await
                .unwrap();
        }
        let (bob_out, mut bob_rx) = outbound();
        usecase.execute(&id("b"), name("bob"), bob_out).await.unwrap();
        drain(&mut bob_rx);

        // when (操作):
        let (alice_out, mut alice_rx) = outbound();
        let result = usecase.execute(&id("a"), name("alice"), alice_out).await;

        // then (期待する結果):
        let event = result.unwrap();
        assert_eq!(event.kind, EventKind::Join);
        assert_eq!(event.sender, name("alice"));
        assert_eq!(repository.identity_of(&id("a")).await, Some(name("alice")));
        assert_eq!(broker.subscriber_count().await, 2);

        for rx in [&mut alice_rx, &mut bob_rx] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].kind, EventKind::Join);
            assert_eq!(frames[0].sender, "alice");
            assert_eq!(frames[0].content, "");
        }
    }

    #[tokio::test]
    async fn test_join_unknown_connection_does_not_publish() {
        // テスト項目: 未登録の接続の JOIN はエラーになり、購読も配信もされない
        // given (前提条件):
        let mut repository = MockConnectionRepository::new();
        repository
            .expect_bind_identity()
            .times(1)
            .returning(|connection_id, _| {
                Err(RegistryError::UnknownConnection(connection_id.to_string()))
            });
        let mut broker = MockTopicBroker::new();
        broker.expect_subscribe().never();
        broker.expect_publish().never();
        let usecase = JoinChatUseCase::new(Arc::new(repository), Arc::new(broker));

        // when (操作):
        let (out, _rx) = outbound();
        let result = usecase.execute(&id("ghost"), name("alice"), out).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::UnknownConnection("ghost".to_string())
        );
    }

    #[tokio::test]
    async fn test_join_twice_keeps_first_identity() {
        // テスト項目: 二回目の JOIN は AlreadyBound になり、識別名は変わらない
        // given (前提条件):
        let (repository, broker) = create_test_backends();
        let usecase = JoinChatUseCase::new(repository.clone(), broker.clone());
        repository
            .register(Connection::new(id("a"), Timestamp::new(0)))
            .await
            .unwrap();
        let (out, mut rx) = outbound();
        usecase.execute(&id("a"), name("alice"), out.clone()).await.unwrap();
        drain(&mut rx);

        // when (操作):
        let result = usecase.execute(&id("a"), name("mallory"), out).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RegistryError::AlreadyBound { .. })));
        assert_eq!(repository.identity_of(&id("a")).await, Some(name("alice")));
        assert!(drain(&mut rx).is_empty());
    }
}
