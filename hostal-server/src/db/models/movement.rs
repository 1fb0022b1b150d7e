//! Inventory movement (kardex) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::MovementType;

use super::serde_helpers;

/// Reason written on the opening movement of a product created with stock.
pub const REASON_INITIAL_STOCK: &str = "STOCK_INICIAL";

/// Reason written on every OUT movement produced by a counter sale.
pub const REASON_COUNTER_SALE: &str = "VENTA_MOSTRADOR";

/// Inventory movement matching the `inventory_movement` table
///
/// Movements are append-only: no update path exists anywhere in the
/// codebase, and none may be added. The ledger is the source of truth the
/// stock cache is derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    /// Always positive; direction comes from `kind`
    pub quantity: i64,
    pub unit_cost: Decimal,
    pub reason: String,
    /// Link to the originating sale, when there is one
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub performed_by: RecordId,
    pub created_at: i64,
}

/// Manual movement registration payload (kardex endpoint)
#[derive(Debug, Clone, Deserialize)]
pub struct MovementRegister {
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: i64,
    pub unit_cost: Decimal,
    pub reason: String,
}

/// Kardex listing filters (query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementFilter {
    pub product_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MovementType>,
}
