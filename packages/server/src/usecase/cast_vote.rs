//! UseCase: 投票
//!
//! 同じ値を再度送ると取り消し（トグル）。投票値は公開まで他の参加者に見えないが、
//! `voted` の変化は見えるため、成功した投票は常に配信する。

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, RoomId, SessionRegistry, Vote, VoteChange};

use super::{error::RoomEventError, notify::publish_room_update};

/// 投票のユースケース
pub struct CastVoteUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CastVoteUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 投票を実行
    ///
    /// ルーム・参加者が存在しない場合や範囲外の投票は `Err` を返し、何も配信しない。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        vote: Vote,
    ) -> Result<VoteChange, RoomEventError> {
        let room = self
            .registry
            .get_room(room_id)
            .await
            .ok_or_else(|| RoomEventError::RoomNotFound(room_id.as_str().to_string()))?;

        let mut room = room.lock().await;
        let change = room.cast_vote(participant_id, vote)?;
        tracing::debug!(
            "Participant '{}' in room '{}': {:?} ({}, {})",
            participant_id,
            room_id,
            change,
            vote.row,
            vote.column
        );
        publish_room_update(self.message_pusher.as_ref(), &room).await;

        Ok(change)
    }
}
