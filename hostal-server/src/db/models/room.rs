//! Room model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::RoomStatus;

use super::serde_helpers;

/// Room model matching the `room` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Room code, unique within its floor
    pub code: String,
    #[serde(with = "serde_helpers::record_id")]
    pub floor: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub room_type: RecordId,
    pub status: RoomStatus,
    /// Inherited from the room type at creation time
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoomCreate {
    pub code: String,
    pub floor_id: String,
    pub type_id: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update room payload (status changes come through here; any status may
/// follow any other)
#[derive(Debug, Clone, Deserialize)]
pub struct RoomUpdate {
    pub status: Option<RoomStatus>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
