//! Sale Repository
//!
//! Read side only; sale creation is a ledger transaction.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Sale;

use super::{BaseRepository, RepoResult, record_id};

const TABLE: &str = "sale";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All sales, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT * FROM sale ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(sales)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sale>> {
        let sale: Option<Sale> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(sale)
    }
}
