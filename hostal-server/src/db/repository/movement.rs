//! Inventory Movement Repository
//!
//! Read side of the kardex. Appends happen exclusively inside the
//! inventory ledger's transactions; there is no update or delete path at
//! all, which is what makes the log append-only.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{InventoryMovement, MovementFilter};

use super::{BaseRepository, RepoResult, record_id};

#[derive(Clone)]
pub struct MovementRepository {
    base: BaseRepository,
}

impl MovementRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List movements, newest first, optionally filtered by product
    /// and/or direction.
    pub async fn list(&self, filter: MovementFilter) -> RepoResult<Vec<InventoryMovement>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.product_id.is_some() {
            conditions.push("product = $product");
        }
        if filter.kind.is_some() {
            conditions.push("type = $kind");
        }

        let mut sql = String::from("SELECT * FROM inventory_movement");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(product_id) = filter.product_id {
            query = query.bind(("product", record_id("product", &product_id).to_string()));
        }
        if let Some(kind) = filter.kind {
            query = query.bind(("kind", kind.as_str()));
        }

        let movements: Vec<InventoryMovement> = query.await?.take(0)?;
        Ok(movements)
    }
}
