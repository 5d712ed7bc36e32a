//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続の登録解除と、最後の接続が外れた参加者の削除
//!
//! ### なぜこのテストが必要か
//! - タブを 1 つ閉じただけでは参加者が消えず、余計な配信も起きないことを保証
//! - 最後の接続が外れたときにだけ残りの参加者へ配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：単一接続の参加者の切断
//! - エッジケース：複数接続の参加者が 1 接続ずつ切断
//! - 異常系：ライブでないルーム・存在しない参加者の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, ParticipantId, RoomId, SessionRegistry};

use super::{error::RoomEventError, notify::publish_room_update};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 参加済みの接続の切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 参加者がルームから削除された（残りの参加者に配信済み）
    /// * `Ok(false)` - 参加者にはまだ他の接続がある、または参加者が存在しない（配信なし）
    /// * `Err(RoomEventError::RoomNotFound)` - ライブでないルーム
    pub async fn execute(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        connection_id: &ConnectionId,
    ) -> Result<bool, RoomEventError> {
        // 1. 配信対象から外す
        self.release_connection(connection_id).await;

        // 2. ルームのロック内で接続を外し、参加者が消えた場合だけ配信
        let room = self
            .registry
            .get_room(room_id)
            .await
            .ok_or_else(|| RoomEventError::RoomNotFound(room_id.as_str().to_string()))?;

        let mut room = room.lock().await;
        let removed = room.disconnect(participant_id, connection_id);
        if removed {
            tracing::info!(
                "Participant '{}' left room '{}' ({} participant(s) remaining)",
                participant_id,
                room_id,
                room.participant_count()
            );
            publish_room_update(self.message_pusher.as_ref(), &room).await;
        } else {
            tracing::debug!(
                "Connection '{}' of participant '{}' closed, participant still present or unknown",
                connection_id,
                participant_id
            );
        }

        Ok(removed)
    }

    /// どのルームにも参加していない接続の後始末
    pub async fn release_connection(&self, connection_id: &ConnectionId) {
        self.message_pusher
            .unregister_connection(connection_id)
            .await;
    }
}
