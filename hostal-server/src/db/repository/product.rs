//! Product Repository
//!
//! Reads and plain updates only. Creation and everything that moves the
//! stock cache goes through the inventory ledger, which owns the
//! movement/cache consistency.

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Product, ProductUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    pub async fn find_by_barcode(&self, barcode: &str) -> RepoResult<Option<Product>> {
        let barcode = barcode.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE barcode = $barcode LIMIT 1")
            .bind(("barcode", barcode))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Update product fields. The stock cache is not reachable from here.
    ///
    /// Barcode: absent keeps the current value, an empty string clears it,
    /// any other value is set after a uniqueness check.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("PRODUCT_NOT_FOUND".to_string()))?;
        let existing_id = existing
            .id
            .ok_or_else(|| RepoError::Database("product record without id".to_string()))?;

        let mut clear_barcode = false;
        let mut set_barcode: Option<String> = None;
        if let Some(raw) = data.barcode {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                clear_barcode = true;
            } else {
                if let Some(other) = self.find_by_barcode(trimmed).await?
                    && other.id.map(|i| i.to_string()) != Some(existing_id.to_string())
                {
                    return Err(RepoError::Duplicate("BARCODE_ALREADY_EXISTS".to_string()));
                }
                set_barcode = Some(trimmed.to_string());
            }
        }

        #[derive(Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            barcode: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            unit: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            purchase_price: Option<rust_decimal::Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sale_price: Option<rust_decimal::Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = ProductUpdateDb {
            name: data.name,
            description: data.description,
            barcode: set_barcode,
            category: data.category_id.map(|c| record_id("category", &c).to_string()),
            unit: data.unit_id.map(|u| record_id("unit", &u).to_string()),
            purchase_price: data.purchase_price,
            sale_price: data.sale_price,
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let thing = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?
            .check()?;

        if clear_barcode {
            self.base
                .db()
                .query("UPDATE $thing SET barcode = NONE")
                .bind(("thing", thing.clone()))
                .await?
                .check()?;
        }

        let updated: Option<Product> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("PRODUCT_NOT_FOUND".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let _: Option<Product> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }
}
