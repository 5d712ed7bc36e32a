//! VotingRoom エンティティ
//!
//! 1 つの見積もりセッションのライブ状態。ルームに対する変更はすべてこのメソッド群を
//! 経由し、呼び出し側はルームのロックを保持した状態で呼ぶ。
//!
//! ## 状態遷移
//!
//! ```text
//! NoRound ──start_round──▶ HasRound(Hidden) ──reveal──▶ HasRound(Revealed)
//!                              ▲                               │
//!                              └─────────start_round───────────┘
//! ```
//!
//! 公開はラウンド内で単調。Hidden に戻るのは新しいラウンドを開始したときだけ。

use super::{
    entity::{Participant, Round, VoteChange},
    error::RoomError,
    snapshot::RoomSnapshot,
    value_object::{ConnectionId, DisplayName, MatrixSize, ParticipantId, RoomId, Timestamp, Vote},
};

/// join の結果
///
/// ルームのロック内で判定されるため、並行 join でも取り違えは起きない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// 新しい参加者として追加された（参加者数が増えた）
    Joined,
    /// 既存の参加者に接続が追加された
    Rejoined,
}

#[derive(Debug, Clone)]
pub struct VotingRoom {
    pub id: RoomId,
    pub created_at: Timestamp,
    matrix: MatrixSize,
    /// 参加順を保持する
    participants: Vec<Participant>,
    current_round: Option<Round>,
    revealed: bool,
}

impl VotingRoom {
    pub fn new(id: RoomId, matrix: MatrixSize, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            matrix,
            participants: Vec::new(),
            current_round: None,
            revealed: false,
        }
    }

    fn find_participant_mut(&mut self, participant_id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == participant_id)
    }

    pub fn participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == participant_id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn matrix(&self) -> MatrixSize {
        self.matrix
    }

    /// 参加
    ///
    /// 同じ参加者 ID が既にいれば表示名を更新して接続を追加する。定員はない。
    pub fn join(
        &mut self,
        participant_id: ParticipantId,
        display_name: DisplayName,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> JoinOutcome {
        if let Some(existing) = self.find_participant_mut(&participant_id) {
            existing.update_display_name(display_name);
            existing.add_connection(connection_id);
            return JoinOutcome::Rejoined;
        }

        self.participants.push(Participant::new(
            participant_id,
            display_name,
            connection_id,
            joined_at,
        ));
        JoinOutcome::Joined
    }

    /// 接続の切断
    ///
    /// 参加者の接続が 0 になった場合のみ参加者を削除して `true` を返す。
    /// 他のタブが残っている場合や参加者が存在しない場合は `false`。
    pub fn disconnect(&mut self, participant_id: &ParticipantId, connection_id: &ConnectionId) -> bool {
        let Some(index) = self.participants.iter().position(|p| &p.id == participant_id) else {
            return false;
        };

        let participant = &mut self.participants[index];
        participant.remove_connection(connection_id);
        if participant.has_disconnected() {
            self.participants.remove(index);
            return true;
        }
        false
    }

    /// 投票（トグル）
    pub fn cast_vote(&mut self, participant_id: &ParticipantId, vote: Vote) -> Result<VoteChange, RoomError> {
        if !self.matrix.contains(&vote) {
            return Err(RoomError::VoteOutOfRange {
                row: vote.row,
                column: vote.column,
                rows: self.matrix.rows,
                columns: self.matrix.columns,
            });
        }

        let participant = self
            .find_participant_mut(participant_id)
            .ok_or_else(|| RoomError::ParticipantNotFound(participant_id.as_str().to_string()))?;
        Ok(participant.set_vote(vote))
    }

    /// 投票の公開
    ///
    /// 既に公開済みなら何もせず `false`。
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    /// 新しいラウンドを開始
    ///
    /// 公開状態に関わらず、非公開に戻して全員の投票をリセットする。
    pub fn start_round(&mut self, round: Round) {
        self.current_round = Some(round);
        self.revealed = false;
        for participant in &mut self.participants {
            participant.reset_vote();
        }
    }

    pub fn render(&self) -> RoomSnapshot {
        RoomSnapshot {
            participants: self
                .participants
                .iter()
                .map(|p| p.render(self.revealed))
                .collect(),
            round: self.current_round.clone(),
            revealed: self.revealed,
        }
    }
}
