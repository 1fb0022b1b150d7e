//! Database models
//!
//! One file per table. Record ids follow the "table:key" [`RecordId`]
//! convention end to end; [`serde_helpers`] renders them as plain strings
//! on the wire. Timestamps are i64 Unix millis.
//!
//! [`RecordId`]: surrealdb::RecordId

pub mod category;
pub mod floor;
pub mod movement;
pub mod product;
pub mod role;
pub mod room;
pub mod room_type;
pub mod sale;
pub mod serde_helpers;
pub mod unit;
pub mod user;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use floor::{Floor, FloorCreate, FloorUpdate};
pub use movement::{
    InventoryMovement, MovementFilter, MovementRegister, REASON_COUNTER_SALE, REASON_INITIAL_STOCK,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use role::Role;
pub use room::{Room, RoomCreate, RoomUpdate};
pub use room_type::{RoomType, RoomTypeCreate, RoomTypeUpdate};
pub use sale::{Sale, SaleCreate, SaleItem, SaleLineInput};
pub use unit::{Unit, UnitCreate, UnitUpdate};
pub use user::{Person, PersonCreate, PersonStatus, PersonUpdate, User, UserCreate, UserUpdate};
