//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,
}

/// ルーム操作のエラー
///
/// いずれもクライアント側の古い状態に起因しうるため、呼び出し側では
/// ブロードキャストしないだけの no-op として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("participant '{0}' is not in the room")]
    ParticipantNotFound(String),

    #[error("vote ({row}, {column}) is outside the {rows}x{columns} matrix")]
    VoteOutOfRange {
        row: u32,
        column: u32,
        rows: u32,
        columns: u32,
    },
}

/// 永続化セッション参照のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("session '{0}' already exists")]
    DuplicateSession(String),

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// SessionRegistry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
