//! Repository Module
//!
//! CRUD operations over the embedded document database, one repository
//! per table. Repositories stay mechanical: uniqueness and referential
//! checks that carry a domain error code live here, everything else in
//! the handlers and the inventory ledger.

pub mod category;
pub mod floor;
pub mod movement;
pub mod product;
pub mod room;
pub mod room_type;
pub mod sale;
pub mod unit;
pub mod user;

pub use category::CategoryRepository;
pub use floor::FloorRepository;
pub use movement::MovementRepository;
pub use product::ProductRepository;
pub use room::RoomRepository;
pub use room_type::RoomTypeRepository;
pub use sale::SaleRepository;
pub use unit::UnitRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "table:id" strings everywhere above the repository layer
// =============================================================================
//
// RecordId handles all ids:
//   - parse:      let id: RecordId = "product:abc".parse()?;
//   - construct:  RecordId::from_table_key("product", "abc")
//   - CRUD:       db.select(id) / db.delete(id) take RecordId directly

/// Build a record id for `table` from a raw client-supplied id, accepting
/// both `"table:key"` and bare `"key"` forms.
pub fn record_id(table: &str, raw: &str) -> RecordId {
    match raw.split_once(':') {
        Some((t, key)) if t == table => RecordId::from_table_key(table, key),
        _ => RecordId::from_table_key(table, raw),
    }
}

/// Generate a fresh record key.
pub fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_both_forms() {
        assert_eq!(
            record_id("floor", "abc").to_string(),
            RecordId::from_table_key("floor", "abc").to_string()
        );
        assert_eq!(
            record_id("floor", "floor:abc").to_string(),
            RecordId::from_table_key("floor", "abc").to_string()
        );
    }
}
