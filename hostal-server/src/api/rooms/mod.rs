//! Room routes
//!
//! Reads and status changes include housekeeping; creating and deleting
//! rooms stays with admins.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::{ADMIN_ONLY, ROOM_STAFF};

pub fn router() -> Router<ServerState> {
    let staff_routes = Router::new()
        .route("/api/rooms", get(handler::list))
        .route("/api/rooms/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_roles(ROOM_STAFF)));

    let admin_routes = Router::new()
        .route("/api/rooms", post(handler::create))
        .route("/api/rooms/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_roles(ADMIN_ONLY)));

    staff_routes.merge(admin_routes)
}
