//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 本来セッションのレコードはユーザー・マトリクスと共に外部 DB が所有します。
//! このリポジトリは `POST /api/sessions` で作成されたレコードをプロセス内に保持し、
//! ルーム作成時の存在確認に応えるだけの代替実装です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{RepositoryError, RoomId, SessionRecord, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<RoomId, SessionRecord>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のレコードを持った状態で作成
    pub fn with_sessions(records: impl IntoIterator<Item = SessionRecord>) -> Self {
        let sessions = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            sessions: RwLock::new(sessions),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_session(&self, room_id: &RoomId) -> Result<Option<SessionRecord>, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(room_id).cloned())
    }

    async fn save_session(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&record.id) {
            return Err(RepositoryError::DuplicateSession(record.id.into_string()));
        }
        tracing::debug!("Session '{}' saved", record.id);
        sessions.insert(record.id.clone(), record);
        Ok(())
    }
}
