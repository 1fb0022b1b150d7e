//! Hostal Admin Server
//!
//! Backend for the hotel/inventory administration panel: floors, room
//! types and rooms; staff with role-based access; product catalog, stock
//! ledger (kardex) and point-of-sale checkout. Embedded SurrealDB
//! storage, JWT sessions re-validated against the database on every
//! protected request.
//!
//! # Module structure
//!
//! ```text
//! hostal-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── auth/          # JWT service, verification service, guard middleware
//! ├── db/            # embedded database, models, repositories
//! ├── inventory/     # movement ledger + stock cache engine
//! ├── api/           # routes and handlers, one module per resource
//! └── utils/         # errors, logging, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod utils;

// Re-export common types
pub use crate::auth::{AuthVerificationService, CurrentUser, JwtConfig, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::inventory::{InventoryLedger, LedgerError};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};

/// Security event logging - structured WARN/INFO records under the
/// `security` target so denials are separable from application noise.
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
