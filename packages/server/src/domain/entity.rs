//! エンティティ
//!
//! - `Participant`: 論理的な投票者 1 人と、その人を表すライブ接続の集合
//! - `Round`: 投票ラウンドのメタデータ（作成後は不変）
//! - `SessionRecord`: 外部に永続化されたセッション（ルームの存在根拠）

use std::collections::HashSet;

use super::{
    snapshot::ParticipantView,
    value_object::{
        ConnectionId, DisplayName, MatrixSize, ParticipantId, RoomId, RoundName, SessionName,
        Timestamp, Vote,
    },
};

/// 投票操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// 新しい値が設定された
    Cast,
    /// 同じ値が再度送られたため取り消された
    Retracted,
}

/// 参加者
///
/// `connections` が空の参加者はルームに存在してはならない。
/// 空になった時点でルーム側が削除する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
    connections: HashSet<ConnectionId>,
    vote: Option<Vote>,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        display_name: DisplayName,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            joined_at,
            connections: HashSet::from([connection_id]),
            vote: None,
        }
    }

    /// 接続を追加（冪等）
    pub fn add_connection(&mut self, connection_id: ConnectionId) {
        self.connections.insert(connection_id);
    }

    /// 接続を削除（存在しなくてもエラーにしない）
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
    }

    pub fn has_disconnected(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn has_connection(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains(connection_id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn update_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
    }

    pub fn vote(&self) -> Option<Vote> {
        self.vote
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    /// 投票（トグル）
    ///
    /// 現在の投票と同じ値なら取り消し、それ以外は上書きする。
    pub fn set_vote(&mut self, vote: Vote) -> VoteChange {
        if self.vote == Some(vote) {
            self.reset_vote();
            return VoteChange::Retracted;
        }
        self.vote = Some(vote);
        VoteChange::Cast
    }

    pub fn reset_vote(&mut self) {
        self.vote = None;
    }

    pub fn render(&self, include_vote: bool) -> ParticipantView {
        ParticipantView {
            participant_id: self.id.clone(),
            display_name: self.display_name.clone(),
            voted: self.has_voted(),
            vote: if include_vote { self.vote } else { None },
        }
    }
}

/// 投票ラウンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub name: RoundName,
    pub description: Option<String>,
}

impl Round {
    /// 説明は前後の空白を除去し、空なら `None` として扱う
    pub fn new(name: RoundName, description: Option<String>) -> Self {
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Self { name, description }
    }
}

/// 永続化されたセッションのレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: RoomId,
    pub name: SessionName,
    pub matrix: MatrixSize,
    pub created_at: Timestamp,
}
