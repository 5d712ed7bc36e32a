//! UseCase: 新しいラウンドの開始

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, Round, SessionRegistry};

use super::{error::RoomEventError, notify::publish_room_update};

/// ラウンド開始のユースケース
pub struct StartRoundUseCase {
    registry: Arc<dyn SessionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartRoundUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ラウンドを開始し、常に配信する
    pub async fn execute(&self, room_id: &RoomId, round: Round) -> Result<(), RoomEventError> {
        let room = self
            .registry
            .get_room(room_id)
            .await
            .ok_or_else(|| RoomEventError::RoomNotFound(room_id.as_str().to_string()))?;

        let mut room = room.lock().await;
        tracing::info!("Round '{}' started in room '{}'", round.name, room_id);
        room.start_round(round);
        publish_room_update(self.message_pusher.as_ref(), &room).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoundName, Vote},
        usecase::{
            CastVoteUseCase, JoinSessionUseCase, RevealVotesUseCase,
            test_support::{drain, fixture, join_input, pid, room_id},
        },
    };
    use serde_json::json;

    fn round(name: &str, description: Option<&str>) -> Round {
        Round::new(
            RoundName::new(name.to_string()).unwrap(),
            description.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_start_round_resets_everything() {
        // テスト項目: 投票済み・公開済みの状態から新ラウンドで全てリセットされる
        // given (前提条件):
        let f = fixture();
        let join = JoinSessionUseCase::new(f.registry.clone(), f.pusher.clone(), f.clock.clone());
        let vote = CastVoteUseCase::new(f.registry.clone(), f.pusher.clone());
        let reveal = RevealVotesUseCase::new(f.registry.clone(), f.pusher.clone());
        let usecase = StartRoundUseCase::new(f.registry.clone(), f.pusher.clone());
        let mut rx = f.connect("c1").await;
        let _rx2 = f.connect("c2").await;
        join.execute(join_input("R1", "A", "c1")).await.unwrap();
        join.execute(join_input("R1", "B", "c2")).await.unwrap();
        vote.execute(&room_id("R1"), &pid("A"), Vote::new(0, 1))
            .await
            .unwrap();
        vote.execute(&room_id("R1"), &pid("B"), Vote::new(2, 2))
            .await
            .unwrap();
        reveal.execute(&room_id("R1")).await.unwrap();
        drain(&mut rx);

        // when (操作):
        let result = usecase
            .execute(&room_id("R1"), round("Round 2", None))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(
            drain(&mut rx),
            vec![json!({
                "type": "session-update",
                "participants": [
                    {"participantId": "A", "displayName": "A name", "voted": false},
                    {"participantId": "B", "displayName": "B name", "voted": false}
                ],
                "round": {"name": "Round 2"},
                "revealed": false
            })]
        );
    }

    #[tokio::test]
    async fn test_start_round_with_description_is_broadcast() {
        // テスト項目: 説明付きのラウンドが配信される
        let f = fixture();
        let join = JoinSessionUseCase::new(f.registry.clone(), f.pusher.clone(), f.clock.clone());
        let usecase = StartRoundUseCase::new(f.registry.clone(), f.pusher.clone());
        let mut rx = f.connect("c1").await;
        join.execute(join_input("R1", "A", "c1")).await.unwrap();
        drain(&mut rx);

        usecase
            .execute(&room_id("R1"), round("Login page", Some("OAuth flow")))
            .await
            .unwrap();

        let messages = drain(&mut rx);
        assert_eq!(
            messages[0]["round"],
            json!({"name": "Login page", "description": "OAuth flow"})
        );
    }

    #[tokio::test]
    async fn test_start_round_unknown_room() {
        // テスト項目: ライブでないルームでのラウンド開始は no-op
        let f = fixture();
        let usecase = StartRoundUseCase::new(f.registry.clone(), f.pusher.clone());

        let result = usecase
            .execute(&room_id("R1"), round("Round 1", None))
            .await;

        assert_eq!(result, Err(RoomEventError::RoomNotFound("R1".to_string())));
    }
}
