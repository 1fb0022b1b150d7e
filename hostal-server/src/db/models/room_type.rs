//! Room type model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Room type model matching the `room_type` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nightly base price; rooms inherit it at creation
    pub base_price: Decimal,
    pub capacity: i32,
    pub extra_person_price: Decimal,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room type payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoomTypeCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: Decimal,
    pub capacity: i32,
    pub extra_person_price: Decimal,
}

/// Update room type payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoomTypeUpdate {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub capacity: Option<i32>,
    pub extra_person_price: Option<Decimal>,
    pub is_active: Option<bool>,
}
