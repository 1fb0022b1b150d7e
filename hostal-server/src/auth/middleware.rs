//! Authentication middleware
//!
//! The guard runs in two stages:
//!
//! 1. [`authenticate`] - applied once over the whole API router. Extracts
//!    the bearer token, verifies the signature, then asks
//!    [`AuthVerificationService`] to re-derive the user from the database
//!    and injects the resulting [`CurrentUser`] into request extensions.
//!    This costs a database round-trip on every protected request, and
//!    that is the point: a revoked-but-not-expired token stops working
//!    immediately.
//! 2. [`require_roles`] - applied per resource router. Checks the
//!    already-derived role against the route's allowlist.
//!
//! # Skipped paths
//!
//! - `OPTIONS *` (CORS preflight)
//! - anything outside `/api/`
//! - `/api/health`
//! - `/api/auth/login`, `/api/auth/register`, `/api/auth/system-status`
//!
//! # Error mapping
//!
//! | Failure | Status |
//! |---------|--------|
//! | missing Authorization header | 401 UNAUTHORIZED |
//! | malformed/expired/forged token | 401 INVALID_TOKEN |
//! | USER_NOT_FOUND | 401 |
//! | USER_INACTIVE / USER_DELETED / ROLE_NOT_FOUND / FORBIDDEN | 403 |
//! | verification infrastructure failure | 500 INTERNAL_SECURITY_ERROR |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use shared::RoleName;

use crate::auth::{AuthVerificationService, CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// API routes reachable without a session.
const PUBLIC_API_ROUTES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/system-status",
    "/api/health",
];

/// Authentication middleware - establishes the request identity.
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight requests carry no credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API paths fall through to their own 404 handling
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| {
                security_log!("WARN", "auth_malformed_header", uri = format!("{:?}", req.uri()));
                AppError::invalid_token()
            })?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return Err(AppError::invalid_token());
        }
    };

    // The claims only nominate a subject; everything else is re-derived
    // from the database before the request proceeds.
    let verifier = AuthVerificationService::new(state.get_db());
    let user = verifier.verify(&claims.sub, &RoleName::ALL).await.map_err(|e| {
        security_log!(
            "WARN",
            "session_rejected",
            reason = e.code(),
            subject = claims.sub.clone()
        );
        AppError::Security(e)
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role allowlist middleware - requires one of the given roles.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/floors", get(handler::list))
///     .layer(middleware::from_fn(require_roles(&[RoleName::Admin])));
/// ```
pub fn require_roles(
    roles: &'static [RoleName],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !roles.contains(&user.role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.as_str(),
                    required = format!("{:?}", roles)
                );
                return Err(AppError::forbidden("FORBIDDEN"));
            }

            Ok(next.run(req).await)
        })
    }
}
