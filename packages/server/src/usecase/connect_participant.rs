//! UseCase: 接続開始処理
//!
//! トランスポート層で接続が開いたときに呼ばれ、識別名なしで Connection を登録します。
//! JOIN はクライアントのメッセージで明示的に行うため、ここではイベントを配信しません。

use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, ConnectionRepository, RegistryError, Timestamp};

/// 接続開始のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続を登録
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - 登録された接続
    /// * `Err(RegistryError::DuplicateConnection)` - 同じ ID が既に登録済み
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<Connection, RegistryError> {
        let connection = Connection::new(connection_id, Timestamp::now());
        self.repository.register(connection.clone()).await?;
        Ok(connection)
    }
}
