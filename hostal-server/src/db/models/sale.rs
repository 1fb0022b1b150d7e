//! Sale model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::PaymentMethod;

use super::serde_helpers;

/// One line of a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: i64,
    pub unit_price: Decimal,
    /// quantity * unit_price, computed server-side
    pub total: Decimal,
}

/// Sale model matching the `sale` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(with = "serde_helpers::record_id")]
    pub performed_by: RecordId,
    pub created_at: i64,
}

/// One requested line of a checkout
#[derive(Debug, Clone, Deserialize)]
pub struct SaleLineInput {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// Checkout payload
#[derive(Debug, Clone, Deserialize)]
pub struct SaleCreate {
    pub items: Vec<SaleLineInput>,
    pub payment_method: PaymentMethod,
}
