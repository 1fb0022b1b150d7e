//! Category Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::MessageResponse;

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::AppResult;

/// GET /api/store/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/store/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = CategoryRepository::new(state.get_db());
    let category = repo.create(data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/store/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = CategoryRepository::new(state.get_db());
    Ok(Json(repo.update(&id, data).await?))
}

/// DELETE /api/store/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = CategoryRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
