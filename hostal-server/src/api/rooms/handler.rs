//! Room Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::MessageResponse;

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::db::repository::{RoomRepository, RoomTypeRepository};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RoomListQuery {
    pub floor_id: Option<String>,
}

/// GET /api/rooms?floor_id=...
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<Vec<Room>>> {
    let repo = RoomRepository::new(state.get_db());
    let rooms = match query.floor_id {
        Some(floor_id) => repo.find_by_floor(&floor_id).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(rooms))
}

/// POST /api/rooms
///
/// The room starts AVAILABLE and inherits the base price of its type.
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<RoomCreate>,
) -> AppResult<(StatusCode, Json<Room>)> {
    validate_required_text(&data.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let room_type = RoomTypeRepository::new(state.get_db())
        .find_by_id(&data.type_id)
        .await?
        .ok_or_else(|| AppError::validation("TIPO_HABITACION_NO_VALIDO"))?;

    let repo = RoomRepository::new(state.get_db());
    let room = repo.create(data, room_type.base_price).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PATCH /api/rooms/{id} - status and description changes
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = RoomRepository::new(state.get_db());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/rooms/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = RoomRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Habitación eliminada correctamente",
    )))
}
