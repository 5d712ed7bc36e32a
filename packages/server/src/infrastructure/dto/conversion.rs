//! Conversion logic between DTOs and domain types.

use crate::domain::{
    Notification, ParticipantView, RejectionCode, Round, RoomSnapshot, SessionRecord, Vote,
};
use crate::infrastructure::dto::{http, websocket as dto};
use mitsumori_shared::time::timestamp_to_jst_rfc3339;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::VoteDto> for Vote {
    fn from(dto: dto::VoteDto) -> Self {
        Vote::new(dto.row, dto.column)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Vote> for dto::VoteDto {
    fn from(vote: Vote) -> Self {
        Self {
            row: vote.row,
            column: vote.column,
        }
    }
}

impl From<ParticipantView> for dto::ParticipantInfo {
    fn from(view: ParticipantView) -> Self {
        Self {
            participant_id: view.participant_id.into_string(),
            display_name: view.display_name.into_string(),
            voted: view.voted,
            vote: view.vote.map(Into::into),
        }
    }
}

impl From<Round> for dto::RoundInfo {
    fn from(round: Round) -> Self {
        Self {
            name: round.name.into_string(),
            description: round.description,
        }
    }
}

impl From<RoomSnapshot> for dto::SessionUpdateMessage {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            r#type: dto::MessageType::SessionUpdate,
            participants: snapshot.participants.into_iter().map(Into::into).collect(),
            round: snapshot.round.map(Into::into),
            revealed: snapshot.revealed,
        }
    }
}

impl From<RejectionCode> for dto::ErrorCode {
    fn from(code: RejectionCode) -> Self {
        match code {
            RejectionCode::SessionNotFound => Self::SessionNotFound,
            RejectionCode::NotJoined => Self::NotJoined,
            RejectionCode::AlreadyJoined => Self::AlreadyJoined,
            RejectionCode::InvalidMessage => Self::InvalidMessage,
            RejectionCode::Internal => Self::InternalError,
        }
    }
}

impl From<Notification> for dto::ServerMessage {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::RoomUpdated(snapshot) => Self::SessionUpdate(snapshot.into()),
            Notification::Rejected { code, message } => Self::Error(dto::ErrorMessage {
                r#type: dto::MessageType::Error,
                code: code.into(),
                message,
            }),
        }
    }
}

impl From<SessionRecord> for http::SessionDto {
    fn from(record: SessionRecord) -> Self {
        Self {
            id: record.id.into_string(),
            name: record.name.into_string(),
            rows: record.matrix.rows,
            columns: record.matrix.columns,
            created_at: timestamp_to_jst_rfc3339(record.created_at.value()).unwrap_or_default(),
        }
    }
}

/// Serialize a notification into the JSON text frame sent to clients
pub fn notification_to_json(notification: &Notification) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerMessage::from(notification.clone()))
}
