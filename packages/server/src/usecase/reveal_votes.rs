//! UseCase: 投票の公開

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, SessionRegistry};

use super::{error::RoomEventError, notify::publish_room_update};

/// 投票公開のユースケース
pub struct RevealVotesUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RevealVotesUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 公開を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 公開状態に変わった（配信済み）
    /// * `Ok(false)` - 既に公開済み（配信なし）
    pub async fn execute(&self, room_id: &RoomId) -> Result<bool, RoomEventError> {
        let room = self
            .registry
            .get_room(room_id)
            .await
            .ok_or_else(|| RoomEventError::RoomNotFound(room_id.as_str().to_string()))?;

        let mut room = room.lock().await;
        if !room.reveal() {
            tracing::debug!("Room '{}' is already revealed", room_id);
            return Ok(false);
        }
        tracing::info!("Votes revealed in room '{}'", room_id);
        publish_room_update(self.message_pusher.as_ref(), &room).await;

        Ok(true)
    }
}
