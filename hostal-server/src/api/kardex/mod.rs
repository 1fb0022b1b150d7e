//! Kardex (inventory movement log) routes

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::FRONT_DESK;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/store/kardex",
            get(handler::list).post(handler::register),
        )
        .layer(middleware::from_fn(require_roles(FRONT_DESK)))
}
