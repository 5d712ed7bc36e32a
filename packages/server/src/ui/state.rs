//! Server state shared by all handlers.

use std::sync::Arc;

use mitsumori_shared::time::Clock;

use crate::{
    domain::{MessagePusher, SessionRegistry, SessionRepository},
    usecase::{
        CastVoteUseCase, CreateSessionUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        JoinSessionUseCase, RevealVotesUseCase, StartRoundUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinSessionUseCase（ルーム参加のユースケース）
    pub join_session_usecase: Arc<JoinSessionUseCase>,
    /// CastVoteUseCase（投票のユースケース）
    pub cast_vote_usecase: Arc<CastVoteUseCase>,
    /// RevealVotesUseCase（投票公開のユースケース）
    pub reveal_votes_usecase: Arc<RevealVotesUseCase>,
    /// StartRoundUseCase（ラウンド開始のユースケース）
    pub start_round_usecase: Arc<StartRoundUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// CreateSessionUseCase（セッション作成のユースケース）
    pub create_session_usecase: Arc<CreateSessionUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// MessagePusher（接続の登録と、送信元へのエラー通知に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl AppState {
    /// Wire every use case from the shared collaborators.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            join_session_usecase: Arc::new(JoinSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            cast_vote_usecase: Arc::new(CastVoteUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            reveal_votes_usecase: Arc::new(RevealVotesUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            start_round_usecase: Arc::new(StartRoundUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            create_session_usecase: Arc::new(CreateSessionUseCase::new(sessions, clock)),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
            message_pusher,
        }
    }
}
