//! UseCase: セッションの作成
//!
//! 永続化セッションのレコードを作成する。ルーム自体は最初の join で作られる。

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{MatrixSize, RoomId, SessionName, SessionRecord, SessionRepository, Timestamp};

use super::error::CreateSessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSessionInput {
    pub name: String,
    pub rows: u32,
    pub columns: u32,
}

/// セッション作成のユースケース
pub struct CreateSessionUseCase {
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateSessionUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { sessions, clock }
    }

    pub async fn execute(&self, input: CreateSessionInput) -> Result<SessionRecord, CreateSessionError> {
        let record = SessionRecord {
            id: RoomId::generate(),
            name: SessionName::new(input.name)?,
            matrix: MatrixSize::new(input.rows, input.columns)?,
            created_at: Timestamp::new(self.clock.now_millis()),
        };
        self.sessions.save_session(record.clone()).await?;
        tracing::info!(
            "Session '{}' created ({}x{} matrix)",
            record.id,
            record.matrix.rows,
            record.matrix.columns
        );
        Ok(record)
    }
}
