//! WebSocket message DTOs.
//!
//! Every frame is a JSON text message tagged by `type`.

use serde::{Deserialize, Serialize};

/// Type tag of server → client messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    SessionUpdate,
    Error,
}

/// Error codes sent to the originating connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    SessionNotFound,
    NotJoined,
    AlreadyJoined,
    InvalidMessage,
    InternalError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDto {
    pub row: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub participant_id: String,
    pub display_name: String,
    pub voted: bool,
    /// Present only after the votes are revealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<VoteDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full room snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdateMessage {
    pub r#type: MessageType,
    pub participants: Vec<ParticipantInfo>,
    pub round: Option<RoundInfo>,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub code: ErrorCode,
    pub message: String,
}

/// Any server → client message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    SessionUpdate(SessionUpdateMessage),
    Error(ErrorMessage),
}

/// Client → server messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Join {
        room_id: String,
        participant_id: String,
        display_name: String,
    },
    Vote {
        vote: VoteDto,
    },
    Reveal,
    StartRound {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Leave,
}
