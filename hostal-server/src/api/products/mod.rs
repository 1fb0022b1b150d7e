//! Product routes

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch},
};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::{ADMIN_ONLY, FRONT_DESK};

pub fn router() -> Router<ServerState> {
    let front_desk_routes = Router::new()
        .route(
            "/api/store/products",
            get(handler::list).post(handler::create),
        )
        .route("/api/store/products/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_roles(FRONT_DESK)));

    let admin_routes = Router::new()
        .route("/api/store/products/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_roles(ADMIN_ONLY)));

    front_desk_routes.merge(admin_routes)
}
