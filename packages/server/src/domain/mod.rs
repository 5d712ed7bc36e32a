//! ドメイン層
//!
//! 値オブジェクト、エンティティ、ルームの状態機械と、
//! ドメインが必要とする外部協調者の trait を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod snapshot;
pub mod value_object;

pub use entity::{Participant, Round, SessionRecord, VoteChange};
pub use error::{MessagePushError, RegistryError, RepositoryError, RoomError, ValueObjectError};
pub use message_pusher::{MessagePusher, Notification, PusherChannel, RejectionCode};
pub use repository::{SessionRegistry, SessionRepository, SharedRoom};
pub use room::{JoinOutcome, VotingRoom};
pub use snapshot::{ParticipantView, RoomSnapshot};
pub use value_object::{
    ConnectionId, DisplayName, MatrixSize, ParticipantId, RoomId, RoundName, SessionName,
    Timestamp, Vote,
};
