//! Inventory Ledger Engine
//!
//! Owns every mutation that touches the movement log (kardex) or a
//! product's stock cache, and nothing else does. The cache invariant -
//! `current_stock` equals the signed sum of all movements for the
//! product - holds because each mutation writes the movement and the
//! cache delta inside one database transaction:
//!
//! - a counter sale persists the sale record, one OUT movement per line
//!   and each line's stock decrement atomically; a mid-flight failure
//!   rolls everything back, so partial application cannot occur
//! - the decrement re-checks non-negativity inside the transaction, so
//!   two concurrent sales that both passed the pre-check cannot drive the
//!   cache negative: the loser's transaction is thrown and rejected
//! - a product created with opening stock writes the product and its
//!   `STOCK_INICIAL` movement together, keeping ledger and cache
//!   consistent from t=0
//!
//! Manual OUT adjustments may overdraw the cache when
//! [`InventoryPolicy::allow_negative_adjustment`] is set (the default);
//! this is the deliberate escape hatch for corrections, switchable off
//! per deployment.

#[cfg(test)]
mod tests;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use rust_decimal::Decimal;
use shared::MovementType;

use crate::core::InventoryPolicy;
use crate::db::models::{
    InventoryMovement, MovementRegister, Product, ProductCreate, REASON_COUNTER_SALE,
    REASON_INITIAL_STOCK, Sale, SaleCreate, SaleItem,
};
use crate::db::repository::{ProductRepository, RepoError, new_key, record_id};
use crate::utils::now_millis;

/// Ledger errors
///
/// The `Display` form is the wire code: `KIND:detail` for errors that
/// carry an entity, a bare code otherwise. The sales route boundary
/// splits on the colon to build the user-facing message.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("PRODUCT_NOT_FOUND:{0}")]
    ProductNotFound(String),

    #[error("PRODUCT_INACTIVE:{0}")]
    ProductInactive(String),

    #[error("INSUFFICIENT_STOCK:{0}")]
    InsufficientStock(String),

    #[error("BARCODE_ALREADY_EXISTS")]
    BarcodeExists,

    #[error("INVALID_QUANTITY")]
    InvalidQuantity,

    #[error("EMPTY_SALE")]
    EmptySale,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// The ledger engine. Cheap to construct per request, like the
/// repositories it wraps.
#[derive(Clone)]
pub struct InventoryLedger {
    db: Surreal<Db>,
    policy: InventoryPolicy,
}

impl InventoryLedger {
    pub fn new(db: Surreal<Db>, policy: InventoryPolicy) -> Self {
        Self { db, policy }
    }

    fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }

    /// Create a product. When `initial_stock` is positive, the opening
    /// IN movement (`STOCK_INICIAL`, costed at the purchase price) is
    /// written in the same transaction as the product itself.
    pub async fn create_product(
        &self,
        data: ProductCreate,
        performed_by: &str,
    ) -> Result<Product, LedgerError> {
        let barcode = data
            .barcode
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        if let Some(ref code) = barcode
            && self.products().find_by_barcode(code).await?.is_some()
        {
            return Err(LedgerError::BarcodeExists);
        }

        let initial_stock = data.initial_stock.unwrap_or(0);
        if initial_stock < 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let now = now_millis();
        let product_id = RecordId::from_table_key("product", new_key());

        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            barcode,
            category: record_id("category", &data.category_id),
            unit: record_id("unit", &data.unit_id),
            purchase_price: data.purchase_price,
            sale_price: data.sale_price,
            current_stock: initial_stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        if initial_stock > 0 {
            let movement = InventoryMovement {
                id: None,
                product: product_id.clone(),
                kind: MovementType::In,
                quantity: initial_stock,
                unit_cost: product.purchase_price,
                reason: REASON_INITIAL_STOCK.to_string(),
                reference: None,
                performed_by: record_id("user", performed_by),
                created_at: now,
            };

            self.db
                .query(
                    "BEGIN TRANSACTION;
                     CREATE ONLY $product_id CONTENT $product;
                     CREATE inventory_movement CONTENT $movement;
                     COMMIT TRANSACTION;",
                )
                .bind(("product_id", product_id.clone()))
                .bind(("product", product))
                .bind(("movement", movement))
                .await
                .map_err(RepoError::from)?
                .check()
                .map_err(RepoError::from)?;
        } else {
            self.db
                .query("CREATE ONLY $product_id CONTENT $product")
                .bind(("product_id", product_id.clone()))
                .bind(("product", product))
                .await
                .map_err(RepoError::from)?
                .check()
                .map_err(RepoError::from)?;
        }

        let created: Option<Product> = self
            .db
            .select(product_id)
            .await
            .map_err(RepoError::from)?;
        created.ok_or_else(|| {
            LedgerError::Repo(RepoError::Database("Failed to create product".to_string()))
        })
    }

    /// Append a movement and apply its signed delta to the stock cache.
    ///
    /// Quantity must be a positive integer; direction comes from the
    /// movement type. OUT adjustments check the stock floor only when the
    /// policy says so.
    pub async fn register_movement(
        &self,
        data: MovementRegister,
        performed_by: &str,
    ) -> Result<InventoryMovement, LedgerError> {
        if data.quantity <= 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let product = self
            .products()
            .find_by_id(&data.product_id)
            .await?
            .ok_or_else(|| LedgerError::ProductNotFound(data.product_id.clone()))?;
        let product_rid = product
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("product record without id".to_string()))?;

        let now = now_millis();
        let delta = data.kind.signed_delta(data.quantity);
        let movement_id = RecordId::from_table_key("inventory_movement", new_key());

        let movement = InventoryMovement {
            id: None,
            product: product_rid.clone(),
            kind: data.kind,
            quantity: data.quantity,
            unit_cost: data.unit_cost,
            reason: data.reason,
            reference: None,
            performed_by: record_id("user", performed_by),
            created_at: now,
        };

        let enforce_floor =
            data.kind == MovementType::Out && !self.policy.allow_negative_adjustment;

        let sql = if enforce_floor {
            "BEGIN TRANSACTION;
             LET $after = (UPDATE ONLY $product_id SET current_stock += $delta, updated_at = $now RETURN AFTER);
             IF $after.current_stock < 0 { THROW string::concat(\"INSUFFICIENT_STOCK:\", $product_name) };
             CREATE ONLY $movement_id CONTENT $movement;
             COMMIT TRANSACTION;"
        } else {
            "BEGIN TRANSACTION;
             UPDATE ONLY $product_id SET current_stock += $delta, updated_at = $now;
             CREATE ONLY $movement_id CONTENT $movement;
             COMMIT TRANSACTION;"
        };

        self.db
            .query(sql)
            .bind(("product_id", product_rid))
            .bind(("delta", delta))
            .bind(("now", now))
            .bind(("product_name", product.name))
            .bind(("movement_id", movement_id.clone()))
            .bind(("movement", movement))
            .await
            .map_err(RepoError::from)?
            .check()
            .map_err(map_tx_error)?;

        let created: Option<InventoryMovement> = self
            .db
            .select(movement_id)
            .await
            .map_err(RepoError::from)?;
        created.ok_or_else(|| {
            LedgerError::Repo(RepoError::Database("Failed to create movement".to_string()))
        })
    }

    /// Create a counter sale as a unit of work.
    ///
    /// Every line is validated before any mutation. The mutation itself is
    /// one transaction: the sale record, each line's stock decrement (with
    /// an in-transaction floor check) and each line's OUT movement either
    /// all commit or none do.
    pub async fn create_sale(
        &self,
        data: SaleCreate,
        performed_by: &str,
    ) -> Result<Sale, LedgerError> {
        if data.items.is_empty() {
            return Err(LedgerError::EmptySale);
        }

        // Phase 1: all-or-nothing pre-check, no mutation yet.
        let mut lines: Vec<(Product, i64, Decimal)> = Vec::with_capacity(data.items.len());
        for item in &data.items {
            if item.quantity <= 0 {
                return Err(LedgerError::InvalidQuantity);
            }

            let product = self
                .products()
                .find_by_id(&item.product_id)
                .await?
                .ok_or_else(|| LedgerError::ProductNotFound(item.product_id.clone()))?;

            if !product.is_active {
                return Err(LedgerError::ProductInactive(product.name));
            }

            if product.current_stock < item.quantity {
                return Err(LedgerError::InsufficientStock(product.name));
            }

            lines.push((product, item.quantity, item.unit_price));
        }

        let now = now_millis();
        let sale_id = RecordId::from_table_key("sale", new_key());
        let performer = record_id("user", performed_by);

        let mut items: Vec<SaleItem> = Vec::with_capacity(lines.len());
        let mut total_amount = Decimal::ZERO;
        for (product, quantity, unit_price) in &lines {
            let total = *unit_price * Decimal::from(*quantity);
            total_amount += total;
            items.push(SaleItem {
                product: product.id.clone().ok_or_else(|| {
                    RepoError::Database("product record without id".to_string())
                })?,
                quantity: *quantity,
                unit_price: *unit_price,
                total,
            });
        }

        let sale = Sale {
            id: None,
            items,
            total_amount,
            payment_method: data.payment_method,
            performed_by: performer.clone(),
            created_at: now,
        };

        // Phase 2: one transaction for the sale, the decrements and the
        // movements. The in-transaction floor check closes the window
        // between the pre-check above and the decrement here.
        let mut sql = String::from(
            "BEGIN TRANSACTION;
             CREATE ONLY $sale_id CONTENT $sale;",
        );
        for i in 0..lines.len() {
            sql.push_str(&format!(
                "LET $after_{i} = (UPDATE ONLY $product_{i} SET current_stock -= $qty_{i}, updated_at = $now RETURN AFTER);
                 IF $after_{i}.current_stock < 0 {{ THROW string::concat(\"INSUFFICIENT_STOCK:\", $name_{i}) }};
                 CREATE inventory_movement CONTENT $movement_{i};"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self
            .db
            .query(sql)
            .bind(("sale_id", sale_id.clone()))
            .bind(("sale", sale))
            .bind(("now", now));

        for (i, (product, quantity, unit_price)) in lines.into_iter().enumerate() {
            let product_rid = product
                .id
                .ok_or_else(|| RepoError::Database("product record without id".to_string()))?;

            let movement = InventoryMovement {
                id: None,
                product: product_rid.clone(),
                kind: MovementType::Out,
                quantity,
                // Sales record the price the stock left at
                unit_cost: unit_price,
                reason: REASON_COUNTER_SALE.to_string(),
                reference: Some(sale_id.clone()),
                performed_by: performer.clone(),
                created_at: now,
            };

            query = query
                .bind((format!("product_{i}"), product_rid))
                .bind((format!("qty_{i}"), quantity))
                .bind((format!("name_{i}"), product.name))
                .bind((format!("movement_{i}"), movement));
        }

        query
            .await
            .map_err(RepoError::from)?
            .check()
            .map_err(map_tx_error)?;

        let created: Option<Sale> = self.db.select(sale_id).await.map_err(RepoError::from)?;
        created.ok_or_else(|| {
            LedgerError::Repo(RepoError::Database("Failed to create sale".to_string()))
        })
    }
}

/// Map a transaction failure back to a typed error. A THROW from the
/// floor check carries the `INSUFFICIENT_STOCK:<name>` code in its
/// message; anything else is an infrastructure failure.
fn map_tx_error(err: surrealdb::Error) -> LedgerError {
    let msg = err.to_string();
    if let Some(idx) = msg.find("INSUFFICIENT_STOCK:") {
        let name = msg[idx + "INSUFFICIENT_STOCK:".len()..].trim().to_string();
        return LedgerError::InsufficientStock(name);
    }
    LedgerError::Repo(RepoError::Database(msg))
}
