//! UseCase: ルームへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSessionUseCase::execute() メソッド
//! - ルームの遅延作成、参加者の追加、複数接続（タブ・再接続）の集約
//!
//! ### なぜこのテストが必要か
//! - 新規参加時はルーム全体へ、再参加時は本人の接続だけへ送る、という配信先の切り替えを保証
//! - 永続化セッションが無い場合にルームが作られないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加、同じ参加者 ID での再参加
//! - 異常系：存在しないセッションへの参加

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, MessagePusher, ParticipantId, RoomId, SessionRegistry,
    Timestamp,
};

use super::{
    error::JoinError,
    notify::{publish_room_update, push_room_snapshot},
};

/// join イベントの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSessionInput {
    pub room_id: RoomId,
    pub participant_id: ParticipantId,
    pub display_name: DisplayName,
    pub connection_id: ConnectionId,
}

/// ルーム参加のユースケース
pub struct JoinSessionUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinSessionUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome::Joined)` - 参加者数が増えた。ルーム全体にスナップショットを配信済み
    /// * `Ok(JoinOutcome::Rejoined)` - 既存参加者の接続が増えた。この接続にだけスナップショットを送信済み
    /// * `Err(JoinError)` - ルームは作成されず、何も配信されていない
    pub async fn execute(&self, input: JoinSessionInput) -> Result<JoinOutcome, JoinError> {
        let JoinSessionInput {
            room_id,
            participant_id,
            display_name,
            connection_id,
        } = input;

        // 1. ルームを取得（なければ永続化セッションを確認して作成）
        let room = self.registry.get_or_create_room(&room_id).await?;

        // 2. 配信対象に加える（新規参加の配信を本人も受け取るため、join より前に行う）
        self.message_pusher
            .subscribe(&room_id, &connection_id)
            .await;

        // 3. ルームのロック内で参加し、同じロック内で配信する
        let mut room = room.lock().await;
        let joined_at = Timestamp::new(self.clock.now_millis());
        let outcome = room.join(
            participant_id.clone(),
            display_name,
            connection_id.clone(),
            joined_at,
        );

        match outcome {
            JoinOutcome::Joined => {
                tracing::info!(
                    "Participant '{}' joined room '{}' ({} participant(s))",
                    participant_id,
                    room_id,
                    room.participant_count()
                );
                publish_room_update(self.message_pusher.as_ref(), &room).await;
            }
            JoinOutcome::Rejoined => {
                tracing::info!(
                    "Participant '{}' rejoined room '{}' via connection '{}'",
                    participant_id,
                    room_id,
                    connection_id
                );
                push_room_snapshot(self.message_pusher.as_ref(), &room, &connection_id).await;
            }
        }

        Ok(outcome)
    }
}
