//! Floor Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::MessageResponse;

use crate::core::ServerState;
use crate::db::models::{Floor, FloorCreate, FloorUpdate};
use crate::db::repository::FloorRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::AppResult;

/// GET /api/floors
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Floor>>> {
    let repo = FloorRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/floors
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<FloorCreate>,
) -> AppResult<(StatusCode, Json<Floor>)> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = FloorRepository::new(state.get_db());
    let floor = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(floor)))
}

/// PATCH /api/floors/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<FloorUpdate>,
) -> AppResult<Json<Floor>> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = FloorRepository::new(state.get_db());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/floors/{id} - refused while the floor still has rooms
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = FloorRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Piso eliminado correctamente")))
}
