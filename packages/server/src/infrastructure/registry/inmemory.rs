//! InMemory Session Registry 実装
//!
//! ライブルームを `RoomId → Arc<Mutex<VotingRoom>>` で保持します。
//!
//! ## ルームの遅延作成
//!
//! 読み取りは RwLock の read のみで済ませ、未作成の場合だけ作成用ロックを取って
//! 再確認する（double-checked locking）。作成用ロックを保持している間に
//! 永続化セッションを確認し、存在する場合のみルームを挿入する。
//! 確認に失敗した場合、マップには何も残らない。
//!
//! ルームはプロセス終了まで破棄しない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mitsumori_shared::time::Clock;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    RegistryError, RoomId, SessionRegistry, SessionRepository, SharedRoom, Timestamp, VotingRoom,
};

pub struct InMemorySessionRegistry {
    rooms: RwLock<HashMap<RoomId, SharedRoom>>,
    creation_lock: Mutex<()>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRegistry {
    pub fn new(sessions: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            creation_lock: Mutex::new(()),
            sessions,
            clock,
        }
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn get_or_create_room(&self, room_id: &RoomId) -> Result<SharedRoom, RegistryError> {
        if let Some(room) = self.get_room(room_id).await {
            return Ok(room);
        }

        let _guard = self.creation_lock.lock().await;
        if let Some(room) = self.get_room(room_id).await {
            return Ok(room);
        }

        let record = self
            .sessions
            .find_session(room_id)
            .await?
            .ok_or_else(|| RegistryError::SessionNotFound(room_id.as_str().to_string()))?;

        let room = Arc::new(Mutex::new(VotingRoom::new(
            record.id,
            record.matrix,
            Timestamp::new(self.clock.now_millis()),
        )));
        self.rooms
            .write()
            .await
            .insert(room_id.clone(), Arc::clone(&room));
        tracing::info!("Room '{}' created", room_id);

        Ok(room)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<SharedRoom> {
        self.rooms.read().await.get(room_id).cloned()
    }

    async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
