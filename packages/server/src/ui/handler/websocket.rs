//! WebSocket connection handlers.

use std::{ops::ControlFlow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{
        ConnectionId, DisplayName, Notification, ParticipantId, RejectionCode, RoomId, Round,
        RoundName, ValueObjectError,
    },
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{JoinError, JoinSessionInput},
};

/// The room a socket has joined. A socket joins at most one room.
#[derive(Debug, Clone)]
struct Membership {
    room_id: RoomId,
    participant_id: ParticipantId,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Everything the server sends to this socket (room snapshots and rejections)
/// goes through the channel registered with the message pusher.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection_id.clone(), tx)
        .await;
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);
    let mut membership: Option<Membership> = None;

    receive_loop(
        &mut receiver,
        &mut send_task,
        &state,
        &connection_id,
        &mut membership,
    )
    .await;
    send_task.abort();

    match membership {
        Some(joined) => {
            match state
                .disconnect_participant_usecase
                .execute(&joined.room_id, &joined.participant_id, &connection_id)
                .await
            {
                Ok(true) => tracing::debug!(
                    "Participant '{}' left room '{}'",
                    joined.participant_id,
                    joined.room_id
                ),
                Ok(false) => tracing::debug!(
                    "Participant '{}' still has open connections in room '{}'",
                    joined.participant_id,
                    joined.room_id
                ),
                Err(e) => tracing::debug!("Disconnect of '{}' ignored: {}", connection_id, e),
            }
        }
        None => {
            state
                .disconnect_participant_usecase
                .release_connection(&connection_id)
                .await;
        }
    }

    tracing::info!("Connection '{}' closed", connection_id);
}

/// Runs until the client leaves, the socket closes or the send task ends.
///
/// Only the wait for the next frame races the send task. A frame that has been
/// received is always handled to completion, so a room mutation is never
/// abandoned halfway.
async fn receive_loop(
    receiver: &mut SplitStream<WebSocket>,
    send_task: &mut JoinHandle<()>,
    state: &AppState,
    connection_id: &ConnectionId,
    membership: &mut Option<Membership>,
) {
    loop {
        let next = tokio::select! {
            next = receiver.next() => next,
            _ = &mut *send_task => {
                tracing::debug!("Send task of '{}' ended", connection_id);
                break;
            }
        };
        let Some(msg) = next else {
            break;
        };
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                if handle_text(state, connection_id, membership, text.as_str())
                    .await
                    .is_break()
                {
                    break;
                }
            }
            Message::Close(_) => {
                tracing::debug!("Connection '{}' sent close frame", connection_id);
                break;
            }
            Message::Ping(_) => {
                // axum が Pong を自動で返す
                tracing::trace!("Ping from '{}'", connection_id);
            }
            _ => {}
        }
    }
}

/// Handle a single text frame. `Break` closes the socket.
async fn handle_text(
    state: &AppState,
    connection_id: &ConnectionId,
    membership: &mut Option<Membership>,
    text: &str,
) -> ControlFlow<()> {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!("Invalid message from '{}': {}", connection_id, e);
            reject(state, connection_id, RejectionCode::InvalidMessage, e.to_string()).await;
            return ControlFlow::Continue(());
        }
    };

    match client_msg {
        ClientMessage::Join {
            room_id,
            participant_id,
            display_name,
        } => {
            if let Some(joined) = membership.as_ref() {
                let message = format!("already joined room '{}'", joined.room_id);
                reject(state, connection_id, RejectionCode::AlreadyJoined, message).await;
                return ControlFlow::Continue(());
            }
            join(
                state,
                connection_id,
                membership,
                room_id,
                participant_id,
                display_name,
            )
            .await;
        }
        ClientMessage::Leave => return ControlFlow::Break(()),
        event => {
            let Some(joined) = membership.as_ref() else {
                let message = "join a room before sending room events".to_string();
                reject(state, connection_id, RejectionCode::NotJoined, message).await;
                return ControlFlow::Continue(());
            };
            dispatch_room_event(state, connection_id, joined, event).await;
        }
    }

    ControlFlow::Continue(())
}

fn parse_join_input(
    connection_id: &ConnectionId,
    room_id: String,
    participant_id: String,
    display_name: String,
) -> Result<JoinSessionInput, ValueObjectError> {
    Ok(JoinSessionInput {
        room_id: RoomId::new(room_id)?,
        participant_id: ParticipantId::new(participant_id)?,
        display_name: DisplayName::new(display_name)?,
        connection_id: connection_id.clone(),
    })
}

/// Join a room. Failures are reported to the sender only.
///
/// The membership is recorded before the join runs and cleared only when the
/// join is rejected, so the close path always disconnects a connection that
/// may have reached the room.
async fn join(
    state: &AppState,
    connection_id: &ConnectionId,
    membership: &mut Option<Membership>,
    room_id: String,
    participant_id: String,
    display_name: String,
) {
    let input = match parse_join_input(connection_id, room_id, participant_id, display_name) {
        Ok(input) => input,
        Err(e) => {
            reject(state, connection_id, RejectionCode::InvalidMessage, e.to_string()).await;
            return;
        }
    };

    let joined = membership.insert(Membership {
        room_id: input.room_id.clone(),
        participant_id: input.participant_id.clone(),
    });

    match state.join_session_usecase.execute(input).await {
        Ok(outcome) => {
            tracing::debug!(
                "Participant '{}' joined room '{}' via '{}' ({:?})",
                joined.participant_id,
                joined.room_id,
                connection_id,
                outcome
            );
        }
        Err(e @ JoinError::SessionNotFound(_)) => {
            *membership = None;
            tracing::info!("Join rejected for '{}': {}", connection_id, e);
            reject(state, connection_id, RejectionCode::SessionNotFound, e.to_string()).await;
        }
        Err(e @ JoinError::Repository(_)) => {
            *membership = None;
            tracing::error!("Join failed for '{}': {}", connection_id, e);
            let message = "failed to look up the session".to_string();
            reject(state, connection_id, RejectionCode::Internal, message).await;
        }
    }
}

async fn dispatch_room_event(
    state: &AppState,
    connection_id: &ConnectionId,
    joined: &Membership,
    event: ClientMessage,
) {
    let result = match event {
        ClientMessage::Vote { vote } => state
            .cast_vote_usecase
            .execute(&joined.room_id, &joined.participant_id, vote.into())
            .await
            .map(|change| tracing::debug!("'{}' vote {:?}", joined.participant_id, change)),
        ClientMessage::Reveal => state
            .reveal_votes_usecase
            .execute(&joined.room_id)
            .await
            .map(|changed| tracing::debug!("Room '{}' reveal (changed: {})", joined.room_id, changed)),
        ClientMessage::StartRound { name, description } => {
            let name = match RoundName::new(name) {
                Ok(name) => name,
                Err(e) => {
                    reject(state, connection_id, RejectionCode::InvalidMessage, e.to_string())
                        .await;
                    return;
                }
            };
            state
                .start_round_usecase
                .execute(&joined.room_id, Round::new(name, description))
                .await
        }
        ClientMessage::Join { .. } | ClientMessage::Leave => Ok(()),
    };

    // 古い状態からの操作などは no-op として扱う
    if let Err(e) = result {
        tracing::debug!("Room event from '{}' ignored: {}", connection_id, e);
    }
}

async fn reject(
    state: &AppState,
    connection_id: &ConnectionId,
    code: RejectionCode,
    message: String,
) {
    let notification = Notification::Rejected { code, message };
    if let Err(e) = state
        .message_pusher
        .push_to(connection_id, &notification)
        .await
    {
        tracing::warn!("Failed to send rejection to '{}': {}", connection_id, e);
    }
}
