//! Unit Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::MessageResponse;

use crate::core::ServerState;
use crate::db::models::{Unit, UnitCreate, UnitUpdate};
use crate::db::repository::UnitRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::AppResult;

/// GET /api/store/units
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Unit>>> {
    let repo = UnitRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/store/units
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<UnitCreate>,
) -> AppResult<(StatusCode, Json<Unit>)> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.abbreviation, "abbreviation", MAX_SHORT_TEXT_LEN)?;

    let repo = UnitRepository::new(state.get_db());
    let unit = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// PATCH /api/store/units/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<UnitUpdate>,
) -> AppResult<Json<Unit>> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref abbreviation) = data.abbreviation {
        validate_required_text(abbreviation, "abbreviation", MAX_SHORT_TEXT_LEN)?;
    }

    let repo = UnitRepository::new(state.get_db());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/store/units/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = UnitRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Unit deleted")))
}
