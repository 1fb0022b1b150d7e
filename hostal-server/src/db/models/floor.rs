//! Floor model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Floor model matching the `floor` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Floor number, unique across the building
    pub number: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create floor payload
#[derive(Debug, Clone, Deserialize)]
pub struct FloorCreate {
    pub number: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update floor payload
#[derive(Debug, Clone, Deserialize)]
pub struct FloorUpdate {
    pub number: Option<i32>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
