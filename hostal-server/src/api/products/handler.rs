//! Product Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::inventory::{InventoryLedger, LedgerError};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/store/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/store/products
///
/// Creation goes through the inventory ledger so an `initial_stock`
/// writes its opening movement atomically with the product.
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let ledger = InventoryLedger::new(state.get_db(), state.config.inventory);
    let product = ledger
        .create_product(data, &user.id)
        .await
        .map_err(|e| match e {
            LedgerError::BarcodeExists => AppError::validation(
                "El código de barras ya está registrado en otro producto.",
            ),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/store/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, data).await.map_err(|e| {
        let app: AppError = e.into();
        match app {
            AppError::Validation(code) if code == "BARCODE_ALREADY_EXISTS" => {
                AppError::validation("El código de barras ya está registrado en otro producto.")
            }
            other => other,
        }
    })?;
    Ok(Json(product))
}

/// DELETE /api/store/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
