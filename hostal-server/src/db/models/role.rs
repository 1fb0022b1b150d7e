//! Role model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::RoleName;

use super::serde_helpers;

/// Role model matching the `role` table
///
/// Role records exist so users can link to them; the set of valid names
/// is the closed [`RoleName`] enum, and records are created lazily the
/// first time a name is referenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: RoleName,
    pub description: String,
    pub created_at: i64,
}

impl Role {
    pub fn new(name: RoleName, created_at: i64) -> Self {
        Self {
            id: None,
            name,
            description: name.default_description().to_string(),
            created_at,
        }
    }
}
