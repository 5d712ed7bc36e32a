//! 値オブジェクト
//!
//! 生の `String` / 整数をそのまま引き回さず、検証済みの型としてドメイン層で扱います。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

const ROOM_ID_MAX_LEN: usize = 64;
const PARTICIPANT_ID_MAX_LEN: usize = 128;
const CONNECTION_ID_MAX_LEN: usize = 64;
const DISPLAY_NAME_MAX_LEN: usize = 100;
const ROUND_NAME_MAX_LEN: usize = 50;
const SESSION_NAME_MAX_LEN: usize = 50;

fn validate(field: &'static str, value: &str, max: usize) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        return Err(ValueObjectError::Empty { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValueObjectError::TooLong { field, max, actual: len });
    }
    Ok(())
}

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// ルーム ID（永続化されたセッションの公開 ID と同一）
    RoomId
);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        validate("room_id", &value, ROOM_ID_MAX_LEN)?;
        Ok(Self(value))
    }

    /// 新しい公開 ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

string_value_object!(
    /// 参加者 ID
    ///
    /// クライアントが生成する安定した ID。再接続や複数タブをまたいで同一。
    ParticipantId
);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate("participant_id", &value, PARTICIPANT_ID_MAX_LEN)?;
        Ok(Self(value))
    }
}

string_value_object!(
    /// トランスポート層の接続 ID（WebSocket 1 本につき 1 つ、サーバー側で採番）
    ConnectionId
);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate("connection_id", &value, CONNECTION_ID_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

string_value_object!(
    /// 表示名
    DisplayName
);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        validate("display_name", &value, DISPLAY_NAME_MAX_LEN)?;
        Ok(Self(value))
    }
}

string_value_object!(
    /// セッション名
    SessionName
);

impl SessionName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        validate("session_name", &value, SESSION_NAME_MAX_LEN)?;
        Ok(Self(value))
    }
}

string_value_object!(
    /// ラウンド名
    RoundName
);

impl RoundName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        validate("round_name", &value, ROUND_NAME_MAX_LEN)?;
        Ok(Self(value))
    }
}

/// 投票（見積もりマトリクス上のセル位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vote {
    pub row: u32,
    pub column: u32,
}

impl Vote {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// 見積もりマトリクスの大きさ
///
/// マトリクス本体は外部（永続化層）が所有する。ルームは大きさだけを保持し、
/// 投票が範囲内かどうかの判定に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSize {
    pub rows: u32,
    pub columns: u32,
}

impl MatrixSize {
    pub fn new(rows: u32, columns: u32) -> Result<Self, ValueObjectError> {
        if rows == 0 || columns == 0 {
            return Err(ValueObjectError::EmptyMatrix);
        }
        Ok(Self { rows, columns })
    }

    pub fn contains(&self, vote: &Vote) -> bool {
        vote.row < self.rows && vote.column < self.columns
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_is_trimmed() {
        // テスト項目: RoomId は前後の空白が除去される
        // when (操作):
        let room_id = RoomId::new("  abc123  ".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(room_id.as_str(), "abc123");
    }

    #[test]
    fn test_room_id_rejects_blank() {
        // テスト項目: 空白のみの RoomId はエラー
        let result = RoomId::new("   ".to_string());

        assert_eq!(result, Err(ValueObjectError::Empty { field: "room_id" }));
    }

    #[test]
    fn test_generated_room_ids_are_unique() {
        // テスト項目: 採番された RoomId は重複しない
        let a = RoomId::generate();
        let b = RoomId::generate();

        assert_ne!(a, b);
        assert!(RoomId::new(a.into_string()).is_ok());
    }

    #[test]
    fn test_participant_id_rejects_empty() {
        // テスト項目: 空の ParticipantId はエラー
        assert!(ParticipantId::try_from(String::new()).is_err());
        assert!(ParticipantId::try_from("alice".to_string()).is_ok());
    }

    #[test]
    fn test_connection_id_has_its_own_limit() {
        // テスト項目: ConnectionId は参加者 ID とは別の上限で検証される
        // given (前提条件):
        let generated = ConnectionId::generate();
        let long_id = "c".repeat(CONNECTION_ID_MAX_LEN + 1);

        // when (操作):
        let result = ConnectionId::new(long_id.clone());

        // then (期待する結果):
        assert!(ConnectionId::new(generated.into_string()).is_ok());
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "connection_id",
                max: CONNECTION_ID_MAX_LEN,
                actual: CONNECTION_ID_MAX_LEN + 1,
            })
        );
        assert!(ParticipantId::new(long_id).is_ok());
    }

    #[test]
    fn test_display_name_too_long() {
        // テスト項目: 上限を超える表示名はエラー
        // given (前提条件):
        let long_name = "a".repeat(DISPLAY_NAME_MAX_LEN + 1);

        // when (操作):
        let result = DisplayName::new(long_name);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "display_name",
                max: DISPLAY_NAME_MAX_LEN,
                actual: DISPLAY_NAME_MAX_LEN + 1,
            })
        );
    }

    #[test]
    fn test_round_name_length_counts_chars() {
        // テスト項目: マルチバイト文字も 1 文字として数える
        let name = "見".repeat(ROUND_NAME_MAX_LEN);

        assert!(RoundName::new(name).is_ok());
    }

    #[test]
    fn test_matrix_contains_vote() {
        // テスト項目: マトリクス範囲内外の判定
        // given (前提条件):
        let matrix = MatrixSize::new(3, 4).unwrap();

        // then (期待する結果):
        assert!(matrix.contains(&Vote::new(0, 0)));
        assert!(matrix.contains(&Vote::new(2, 3)));
        assert!(!matrix.contains(&Vote::new(3, 0)));
        assert!(!matrix.contains(&Vote::new(0, 4)));
    }

    #[test]
    fn test_matrix_rejects_zero_dimension() {
        // テスト項目: 行数または列数が 0 のマトリクスはエラー
        assert_eq!(MatrixSize::new(0, 3), Err(ValueObjectError::EmptyMatrix));
        assert_eq!(MatrixSize::new(3, 0), Err(ValueObjectError::EmptyMatrix));
    }

    #[test]
    fn test_vote_equality() {
        // テスト項目: 行と列が一致すれば同じ投票
        assert_eq!(Vote::new(1, 2), Vote::new(1, 2));
        assert_ne!(Vote::new(1, 2), Vote::new(2, 1));
    }
}
