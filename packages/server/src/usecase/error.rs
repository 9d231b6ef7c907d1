//! UseCase 層のエラー定義

use thiserror::Error;

/// Errors returned by [`super::SendMessageUseCase`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The connection has no bound identity (no JOIN yet, or already gone)
    #[error("connection '{0}' has not joined")]
    NotJoined(String),
}
