use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{MovementType, PaymentMethod};

use crate::core::InventoryPolicy;
use crate::db::DbService;
use crate::db::models::{
    CategoryCreate, MovementFilter, MovementRegister, ProductCreate, REASON_COUNTER_SALE,
    REASON_INITIAL_STOCK, SaleCreate, SaleLineInput, UnitCreate,
};
use crate::db::repository::{CategoryRepository, MovementRepository, SaleRepository, UnitRepository};

use super::{InventoryLedger, LedgerError};

const PERFORMER: &str = "user:tester";

struct Fixture {
    db: Surreal<Db>,
    ledger: InventoryLedger,
    category_id: String,
    unit_id: String,
}

async fn fixture_with_policy(allow_negative_adjustment: bool) -> Fixture {
    let db = DbService::open_memory().await.unwrap().db;

    let category = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Bebidas".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let unit = UnitRepository::new(db.clone())
        .create(UnitCreate {
            name: "Unidad".to_string(),
            abbreviation: "und".to_string(),
        })
        .await
        .unwrap();

    let ledger = InventoryLedger::new(
        db.clone(),
        InventoryPolicy {
            allow_negative_adjustment,
        },
    );

    Fixture {
        db,
        ledger,
        category_id: category.id.unwrap().to_string(),
        unit_id: unit.id.unwrap().to_string(),
    }
}

async fn fixture() -> Fixture {
    fixture_with_policy(true).await
}

impl Fixture {
    async fn product(&self, name: &str, initial_stock: i64) -> String {
        let product = self
            .ledger
            .create_product(
                ProductCreate {
                    name: name.to_string(),
                    description: None,
                    barcode: None,
                    category_id: self.category_id.clone(),
                    unit_id: self.unit_id.clone(),
                    purchase_price: Decimal::new(200, 2),
                    sale_price: Decimal::new(350, 2),
                    initial_stock: Some(initial_stock),
                },
                PERFORMER,
            )
            .await
            .unwrap();
        product.id.unwrap().to_string()
    }

    async fn stock(&self, product_id: &str) -> i64 {
        self.ledger
            .products()
            .find_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .current_stock
    }

    async fn movements_of(&self, product_id: &str) -> Vec<crate::db::models::InventoryMovement> {
        MovementRepository::new(self.db.clone())
            .list(MovementFilter {
                product_id: Some(product_id.to_string()),
                kind: None,
            })
            .await
            .unwrap()
    }

    fn sale_of(&self, product_id: &str, quantity: i64) -> SaleCreate {
        SaleCreate {
            items: vec![SaleLineInput {
                product_id: product_id.to_string(),
                quantity,
                unit_price: Decimal::new(350, 2),
            }],
            payment_method: PaymentMethod::Cash,
        }
    }
}

// ── Stock cache / ledger invariant ──────────────────────────────────

#[tokio::test]
async fn stock_cache_equals_signed_sum_of_movements() {
    let fx = fixture().await;
    let product_id = fx.product("Agua San Luis", 0).await;

    for (kind, qty) in [
        (MovementType::In, 10),
        (MovementType::Out, 3),
        (MovementType::In, 5),
        (MovementType::Out, 2),
    ] {
        fx.ledger
            .register_movement(
                MovementRegister {
                    product_id: product_id.clone(),
                    kind,
                    quantity: qty,
                    unit_cost: Decimal::new(200, 2),
                    reason: "AJUSTE".to_string(),
                },
                PERFORMER,
            )
            .await
            .unwrap();
    }

    let movements = fx.movements_of(&product_id).await;
    let signed_sum: i64 = movements
        .iter()
        .map(|m| m.kind.signed_delta(m.quantity))
        .sum();

    assert_eq!(signed_sum, 10);
    assert_eq!(fx.stock(&product_id).await, signed_sum);
}

#[tokio::test]
async fn initial_stock_writes_opening_movement() {
    let fx = fixture().await;
    let product_id = fx.product("Gaseosa Inca Kola", 10).await;

    assert_eq!(fx.stock(&product_id).await, 10);

    let movements = fx.movements_of(&product_id).await;
    assert_eq!(movements.len(), 1);
    let opening = &movements[0];
    assert_eq!(opening.kind, MovementType::In);
    assert_eq!(opening.quantity, 10);
    assert_eq!(opening.reason, REASON_INITIAL_STOCK);
    assert_eq!(opening.unit_cost, Decimal::new(200, 2));
    assert!(opening.reference.is_none());
}

#[tokio::test]
async fn product_without_initial_stock_has_no_movements() {
    let fx = fixture().await;
    let product_id = fx.product("Chocolate Sublime", 0).await;

    assert_eq!(fx.stock(&product_id).await, 0);
    assert!(fx.movements_of(&product_id).await.is_empty());
}

#[tokio::test]
async fn duplicate_barcode_is_rejected() {
    let fx = fixture().await;

    let mut create = ProductCreate {
        name: "Galletas".to_string(),
        description: None,
        barcode: Some("7750000000001".to_string()),
        category_id: fx.category_id.clone(),
        unit_id: fx.unit_id.clone(),
        purchase_price: Decimal::new(100, 2),
        sale_price: Decimal::new(150, 2),
        initial_stock: None,
    };
    fx.ledger.create_product(create.clone(), PERFORMER).await.unwrap();

    create.name = "Galletas Otras".to_string();
    let err = fx
        .ledger
        .create_product(create, PERFORMER)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::BarcodeExists));
}

#[tokio::test]
async fn zero_quantity_movement_is_rejected() {
    let fx = fixture().await;
    let product_id = fx.product("Agua San Luis", 5).await;

    let err = fx
        .ledger
        .register_movement(
            MovementRegister {
                product_id,
                kind: MovementType::In,
                quantity: 0,
                unit_cost: Decimal::ZERO,
                reason: "AJUSTE".to_string(),
            },
            PERFORMER,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity));
}

// ── Sales ───────────────────────────────────────────────────────────

#[tokio::test]
async fn sale_decrements_stock_and_appends_out_movements() {
    let fx = fixture().await;
    let product_id = fx.product("Gaseosa Inca Kola", 10).await;

    let sale = fx
        .ledger
        .create_sale(fx.sale_of(&product_id, 4), PERFORMER)
        .await
        .unwrap();

    assert_eq!(fx.stock(&product_id).await, 6);
    assert_eq!(sale.total_amount, Decimal::new(1400, 2));
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].total, Decimal::new(1400, 2));

    let movements = fx.movements_of(&product_id).await;
    // opening movement + one OUT for the sale
    assert_eq!(movements.len(), 2);
    let out = movements
        .iter()
        .find(|m| m.kind == MovementType::Out)
        .unwrap();
    assert_eq!(out.quantity, 4);
    assert_eq!(out.reason, REASON_COUNTER_SALE);
    assert_eq!(
        out.reference.as_ref().map(|r| r.to_string()),
        sale.id.map(|id| id.to_string())
    );
}

#[tokio::test]
async fn multi_line_sale_totals_all_lines() {
    let fx = fixture().await;
    let water = fx.product("Agua San Luis", 10).await;
    let soda = fx.product("Gaseosa Inca Kola", 10).await;

    let sale = fx
        .ledger
        .create_sale(
            SaleCreate {
                items: vec![
                    SaleLineInput {
                        product_id: water.clone(),
                        quantity: 2,
                        unit_price: Decimal::new(150, 2),
                    },
                    SaleLineInput {
                        product_id: soda.clone(),
                        quantity: 3,
                        unit_price: Decimal::new(350, 2),
                    },
                ],
                payment_method: PaymentMethod::Card,
            },
            PERFORMER,
        )
        .await
        .unwrap();

    assert_eq!(sale.total_amount, Decimal::new(1350, 2));
    assert_eq!(fx.stock(&water).await, 8);
    assert_eq!(fx.stock(&soda).await, 7);
}

#[tokio::test]
async fn insufficient_stock_rejects_whole_sale_with_no_side_effects() {
    let fx = fixture().await;
    let product_id = fx.product("Gaseosa Inca Kola", 5).await;

    let err = fx
        .ledger
        .create_sale(fx.sale_of(&product_id, 6), PERFORMER)
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientStock(ref name) if name == "Gaseosa Inca Kola"));

    // no sale, no movement beyond the opening one, stock untouched
    assert!(SaleRepository::new(fx.db.clone())
        .find_all()
        .await
        .unwrap()
        .is_empty());
    assert_eq!(fx.movements_of(&product_id).await.len(), 1);
    assert_eq!(fx.stock(&product_id).await, 5);
}

#[tokio::test]
async fn partial_shortage_rolls_back_every_line() {
    // First line alone would fit; the second line's shortage must undo it.
    let fx = fixture().await;
    let water = fx.product("Agua San Luis", 10).await;
    let soda = fx.product("Gaseosa Inca Kola", 1).await;

    let err = fx
        .ledger
        .create_sale(
            SaleCreate {
                items: vec![
                    SaleLineInput {
                        product_id: water.clone(),
                        quantity: 2,
                        unit_price: Decimal::new(150, 2),
                    },
                    SaleLineInput {
                        product_id: soda.clone(),
                        quantity: 5,
                        unit_price: Decimal::new(350, 2),
                    },
                ],
                payment_method: PaymentMethod::Cash,
            },
            PERFORMER,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientStock(_)));
    assert_eq!(fx.stock(&water).await, 10);
    assert_eq!(fx.stock(&soda).await, 1);
    assert_eq!(fx.movements_of(&water).await.len(), 1);
    assert!(SaleRepository::new(fx.db.clone())
        .find_all()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn sequential_sales_exhaust_stock() {
    let fx = fixture().await;
    let product_id = fx.product("Gaseosa Inca Kola", 5).await;

    fx.ledger
        .create_sale(fx.sale_of(&product_id, 3), PERFORMER)
        .await
        .unwrap();
    assert_eq!(fx.stock(&product_id).await, 2);

    let err = fx
        .ledger
        .create_sale(fx.sale_of(&product_id, 3), PERFORMER)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientStock(_)));
    assert_eq!(fx.stock(&product_id).await, 2);
}

#[tokio::test]
async fn inactive_product_cannot_be_sold() {
    let fx = fixture().await;
    let product_id = fx.product("Gaseosa Inca Kola", 5).await;

    fx.ledger
        .products()
        .update(
            &product_id,
            crate::db::models::ProductUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = fx
        .ledger
        .create_sale(fx.sale_of(&product_id, 1), PERFORMER)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ProductInactive(ref name) if name == "Gaseosa Inca Kola"));
}

#[tokio::test]
async fn unknown_product_fails_the_precheck() {
    let fx = fixture().await;

    let err = fx
        .ledger
        .create_sale(fx.sale_of("product:missing", 1), PERFORMER)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ProductNotFound(_)));
}

#[tokio::test]
async fn empty_sale_is_rejected() {
    let fx = fixture().await;

    let err = fx
        .ledger
        .create_sale(
            SaleCreate {
                items: vec![],
                payment_method: PaymentMethod::Cash,
            },
            PERFORMER,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::EmptySale));
}

// ── Manual adjustment policy ────────────────────────────────────────

#[tokio::test]
async fn manual_out_may_overdraw_when_policy_allows() {
    let fx = fixture_with_policy(true).await;
    let product_id = fx.product("Agua San Luis", 2).await;

    fx.ledger
        .register_movement(
            MovementRegister {
                product_id: product_id.clone(),
                kind: MovementType::Out,
                quantity: 5,
                unit_cost: Decimal::new(200, 2),
                reason: "MERMA".to_string(),
            },
            PERFORMER,
        )
        .await
        .unwrap();

    assert_eq!(fx.stock(&product_id).await, -3);
}

#[tokio::test]
async fn manual_out_is_blocked_when_policy_disallows() {
    let fx = fixture_with_policy(false).await;
    let product_id = fx.product("Agua San Luis", 2).await;

    let err = fx
        .ledger
        .register_movement(
            MovementRegister {
                product_id: product_id.clone(),
                kind: MovementType::Out,
                quantity: 5,
                unit_cost: Decimal::new(200, 2),
                reason: "MERMA".to_string(),
            },
            PERFORMER,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientStock(_)));
    // rejected atomically: no movement, stock untouched
    assert_eq!(fx.stock(&product_id).await, 2);
    assert_eq!(fx.movements_of(&product_id).await.len(), 1);
}

// ── Error wire format ───────────────────────────────────────────────

#[test]
fn errors_render_colon_delimited_codes() {
    assert_eq!(
        LedgerError::InsufficientStock("Inca Kola".to_string()).to_string(),
        "INSUFFICIENT_STOCK:Inca Kola"
    );
    assert_eq!(
        LedgerError::ProductInactive("Inca Kola".to_string()).to_string(),
        "PRODUCT_INACTIVE:Inca Kola"
    );
    assert_eq!(LedgerError::BarcodeExists.to_string(), "BARCODE_ALREADY_EXISTS");
}
