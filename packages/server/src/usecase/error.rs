//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RegistryError, RepositoryError, RoomError, ValueObjectError};

/// join の失敗（送信元の接続にだけ通知される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("session lookup failed: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<RegistryError> for JoinError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::SessionNotFound(id) => Self::SessionNotFound(id),
            RegistryError::Repository(e) => Self::Repository(e),
        }
    }
}

/// join 以外のルームイベントの失敗
///
/// クライアントの状態がサーバー再起動などで古くなっている場合に起こりうる。
/// 呼び出し側は no-op として扱い、配信は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomEventError {
    #[error("room '{0}' is not live")]
    RoomNotFound(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateSessionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("failed to save session: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
