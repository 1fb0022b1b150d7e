//! User (staff) management routes - admin only

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_roles;
use crate::core::ServerState;

use super::ADMIN_ONLY;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users", get(handler::list).post(handler::create))
        .route(
            "/api/users/{id}",
            patch(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_roles(ADMIN_ONLY)))
}
