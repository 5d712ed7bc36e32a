//! ルームの描画用スナップショット
//!
//! クライアントが受け取るのはこの形だけ。投票値は公開後のみ含まれる。

use super::{
    entity::Round,
    value_object::{DisplayName, ParticipantId, Vote},
};

/// 参加者 1 人分の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    pub participant_id: ParticipantId,
    pub display_name: DisplayName,
    pub voted: bool,
    /// 公開済みかつ投票済みの場合のみ `Some`
    pub vote: Option<Vote>,
}

/// ルーム全体の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub participants: Vec<ParticipantView>,
    pub round: Option<Round>,
    pub revealed: bool,
}
