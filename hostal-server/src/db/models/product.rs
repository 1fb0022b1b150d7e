//! Product model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Product model matching the `product` table
///
/// `current_stock` is a cache derived from the movement ledger, updated
/// only through the inventory ledger engine. It is never recomputed from
/// the ledger at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unique when present; an empty string is normalized to absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub unit: RecordId,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    /// Stock cache: signed sum of all movements for this product
    pub current_stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub category_id: String,
    pub unit_id: String,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    /// When positive, an opening IN movement is written with the product
    #[serde(default)]
    pub initial_stock: Option<i64>,
}

/// Update product payload
///
/// `barcode` semantics: absent = keep, empty string = clear, anything
/// else = set (uniqueness enforced).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub category_id: Option<String>,
    pub unit_id: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub is_active: Option<bool>,
}
