//! API routing module
//!
//! One module per resource, each exposing a `router()` that declares its
//! own role allowlist. [`build_router`] merges them and wraps everything
//! in the authentication middleware, CORS and request tracing.
//!
//! - [`health`] - liveness check (public)
//! - [`auth`] - login, first-run registration, session verification
//! - [`users`] - staff management (admin)
//! - [`floors`], [`room_types`], [`rooms`] - room administration
//! - [`categories`], [`units`], [`products`] - product catalog
//! - [`kardex`] - inventory movement log
//! - [`sales`] - point-of-sale checkout

pub mod auth;
pub mod categories;
pub mod floors;
pub mod health;
pub mod kardex;
pub mod products;
pub mod room_types;
pub mod rooms;
pub mod sales;
pub mod units;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::RoleName;

use crate::core::ServerState;

/// Destructive and configuration operations
pub(crate) const ADMIN_ONLY: &[RoleName] = &[RoleName::Admin];

/// Day-to-day front desk operations
pub(crate) const FRONT_DESK: &[RoleName] = &[RoleName::Admin, RoleName::Receptionist];

/// Room visibility and status changes, housekeeping included
pub(crate) const ROOM_STAFF: &[RoleName] = &[
    RoleName::Admin,
    RoleName::Receptionist,
    RoleName::Housekeeping,
];

/// Assemble the application router.
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(floors::router())
        .merge(room_types::router())
        .merge(rooms::router())
        .merge(categories::router())
        .merge(units::router())
        .merge(products::router())
        .merge(kardex::router())
        .merge(sales::router())
        // Outermost: establish identity before any role check runs
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
