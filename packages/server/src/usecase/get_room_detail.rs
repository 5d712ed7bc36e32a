//! UseCase: ライブルームの詳細取得（ルームは作成しない）

use std::sync::Arc;

use crate::domain::{RoomId, RoomSnapshot, SessionRegistry, Timestamp};

use super::error::GetRoomDetailError;

/// ルームの詳細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub id: RoomId,
    pub created_at: Timestamp,
    pub participant_count: usize,
    pub snapshot: RoomSnapshot,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomDetail, GetRoomDetailError> {
        let room = self
            .registry
            .get_room(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;

        let room = room.lock().await;
        Ok(RoomDetail {
            id: room.id.clone(),
            created_at: room.created_at,
            participant_count: room.participant_count(),
            snapshot: room.render(),
        })
    }
}
