//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{CreateSessionRequest, ErrorResponse, RoomDetailDto, SessionDto},
    ui::state::AppState,
    usecase::{CreateSessionError, CreateSessionInput, GetRoomDetailError},
};
use mitsumori_shared::time::timestamp_to_jst_rfc3339;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a session record that rooms can later be opened for
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionDto>), ApiError> {
    let input = CreateSessionInput {
        name: request.name,
        rows: request.rows,
        columns: request.columns,
    };

    match state.create_session_usecase.execute(input).await {
        Ok(record) => {
            tracing::info!("Session '{}' created", record.id);
            Ok((StatusCode::CREATED, Json(SessionDto::from(record))))
        }
        Err(e @ CreateSessionError::InvalidInput(_)) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ CreateSessionError::Repository(_)) => {
            tracing::error!("Failed to create session: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to create session",
            ))
        }
    }
}

/// Get live room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let room_id = RoomId::new(room_id)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(detail) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                id: detail.id.as_str().to_string(),
                created_at: timestamp_to_jst_rfc3339(detail.created_at.value())
                    .unwrap_or_default(),
                participant_count: detail.participant_count,
                participants: detail
                    .snapshot
                    .participants
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                round: detail.snapshot.round.map(Into::into),
                revealed: detail.snapshot.revealed,
            };
            Ok(Json(room_detail))
        }
        Err(e @ GetRoomDetailError::RoomNotFound) => {
            Err(api_error(StatusCode::NOT_FOUND, e.to_string()))
        }
    }
}
