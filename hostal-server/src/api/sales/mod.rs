//! Sale (point-of-sale checkout) routes

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::FRONT_DESK;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/store/sales", get(handler::list).post(handler::create))
        .layer(middleware::from_fn(require_roles(FRONT_DESK)))
}
