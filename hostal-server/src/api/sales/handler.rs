//! Sale Handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Sale, SaleCreate};
use crate::db::repository::SaleRepository;
use crate::inventory::{InventoryLedger, LedgerError};
use crate::utils::{AppError, AppResult};

/// GET /api/store/sales - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Sale>>> {
    let repo = SaleRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/store/sales - checkout
///
/// Ledger error codes are resolved to the user-facing messages here, at
/// the boundary; the codes themselves stay machine-readable inside.
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<SaleCreate>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let ledger = InventoryLedger::new(state.get_db(), state.config.inventory);

    let sale = ledger
        .create_sale(data, &user.id)
        .await
        .map_err(|e| match e {
            LedgerError::ProductNotFound(_) => {
                AppError::validation("Uno de los productos no existe.")
            }
            LedgerError::ProductInactive(name) => AppError::validation(format!(
                "El producto \"{name}\" está desactivado y no se puede vender."
            )),
            LedgerError::InsufficientStock(name) => AppError::validation(format!(
                "Stock insuficiente para el producto \"{name}\"."
            )),
            other => other.into(),
        })?;

    tracing::info!(
        sale_id = %sale.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        total = %sale.total_amount,
        performed_by = %user.id,
        "Sale registered"
    );

    Ok((StatusCode::CREATED, Json(sale)))
}
