//! Measurement unit model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Unit model matching the `unit` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub abbreviation: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create unit payload
#[derive(Debug, Clone, Deserialize)]
pub struct UnitCreate {
    pub name: String,
    pub abbreviation: String,
}

/// Update unit payload
#[derive(Debug, Clone, Deserialize)]
pub struct UnitUpdate {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub is_active: Option<bool>,
}
