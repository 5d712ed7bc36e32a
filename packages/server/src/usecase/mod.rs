//! UseCase 層
//!
//! トランスポートのイベント 1 つにつき 1 つのユースケース。
//! いずれも Registry でルームを解決し、ルームのロック内で 1 つのメソッドを呼び、
//! 状態が変わった場合にだけスナップショットを配信する。

mod cast_vote;
mod create_session;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod join_session;
mod notify;
mod reveal_votes;
mod start_round;

#[cfg(test)]
mod test_support;

pub use cast_vote::CastVoteUseCase;
pub use create_session::{CreateSessionInput, CreateSessionUseCase};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{CreateSessionError, GetRoomDetailError, JoinError, RoomEventError};
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use join_session::{JoinSessionInput, JoinSessionUseCase};
pub use reveal_votes::RevealVotesUseCase;
pub use start_round::StartRoundUseCase;
