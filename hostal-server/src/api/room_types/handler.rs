//! Room Type Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::MessageResponse;

use crate::core::ServerState;
use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use crate::db::repository::RoomTypeRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::AppResult;

/// GET /api/room-types
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RoomType>>> {
    let repo = RoomTypeRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/room-types
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<RoomTypeCreate>,
) -> AppResult<(StatusCode, Json<RoomType>)> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = RoomTypeRepository::new(state.get_db());
    let room_type = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(room_type)))
}

/// PATCH /api/room-types/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<RoomTypeUpdate>,
) -> AppResult<Json<RoomType>> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = RoomTypeRepository::new(state.get_db());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/room-types/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = RoomTypeRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Tipo de habitación eliminado correctamente",
    )))
}
