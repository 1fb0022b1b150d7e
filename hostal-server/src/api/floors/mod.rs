//! Floor routes - reads for the front desk, writes for admins

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::{ADMIN_ONLY, FRONT_DESK};

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/floors", get(handler::list))
        .layer(middleware::from_fn(require_roles(FRONT_DESK)));

    let write_routes = Router::new()
        .route("/api/floors", post(handler::create))
        .route(
            "/api/floors/{id}",
            patch(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_roles(ADMIN_ONLY)));

    read_routes.merge(write_routes)
}
