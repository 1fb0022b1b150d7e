//! Kardex Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{InventoryMovement, MovementFilter, MovementRegister};
use crate::db::repository::MovementRepository;
use crate::inventory::InventoryLedger;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::AppResult;

/// GET /api/store/kardex?product_id=...&type=IN|OUT - newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<InventoryMovement>>> {
    let repo = MovementRepository::new(state.get_db());
    Ok(Json(repo.list(filter).await?))
}

/// POST /api/store/kardex - manual movement registration
///
/// The performer always comes from the verified session, never from the
/// request body.
pub async fn register(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<MovementRegister>,
) -> AppResult<(StatusCode, Json<InventoryMovement>)> {
    validate_required_text(&data.reason, "reason", MAX_NOTE_LEN)?;

    let ledger = InventoryLedger::new(state.get_db(), state.config.inventory);
    let movement = ledger.register_movement(data, &user.id).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
