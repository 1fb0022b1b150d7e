//! Authentication Routes
//!
//! - `/api/auth/login`, `/api/auth/register`, `/api/auth/system-status`:
//!   public (listed in the middleware's public routes)
//! - `/api/verify-session`: any authenticated role; the middleware has
//!   already re-derived the user when the handler runs

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/register", post(handler::register_admin))
        .route("/api/auth/system-status", get(handler::system_status))
        .route("/api/verify-session", get(handler::verify_session))
}
