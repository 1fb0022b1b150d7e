//! Unified error handling
//!
//! [`AppError`] is the single error type handlers return. Its
//! `IntoResponse` impl renders the wire format the panel expects:
//!
//! ```json
//! { "error": "<code or message>" }
//! ```
//!
//! | Variant | HTTP status |
//! |---------|-------------|
//! | `Unauthorized`, `InvalidToken`, `CredentialsRejected` | 401 |
//! | `Security` | per [`VerifyError`] code |
//! | `Forbidden` | 403 |
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `Database`, `Internal` | 500, detail logged, generic body |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::auth::verify::VerifyError;
use crate::db::repository::RepoError;
use crate::inventory::LedgerError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    /// No `Authorization` header on a protected route
    #[error("UNAUTHORIZED")]
    Unauthorized,

    /// Malformed header, bad signature, or expired token
    #[error("INVALID_TOKEN")]
    InvalidToken,

    /// Login rejected; carries the code surfaced to the client
    #[error("{0}")]
    CredentialsRejected(&'static str),

    // ========== Authorization ==========
    /// A guard denial from the verification service
    #[error(transparent)]
    Security(#[from] VerifyError),

    /// Valid identity, insufficient role or forbidden action
    #[error("{0}")]
    Forbidden(String),

    // ========== Validation / business rules (400) ==========
    #[error("{0}")]
    Validation(String),

    // ========== Not found (404) ==========
    #[error("{0}")]
    NotFound(String),

    // ========== Infrastructure (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN".to_string()),
            AppError::CredentialsRejected(code) => (StatusCode::UNAUTHORIZED, code.to_string()),

            AppError::Security(verify) => {
                if let VerifyError::Internal(detail) = verify {
                    error!(target: "security", error = %detail, "Security check failed unexpectedly");
                }
                (verify.status(), verify.code().to_string())
            }

            AppError::Forbidden(code) => (StatusCode::FORBIDDEN, code.clone()),
            AppError::Validation(code) => (StatusCode::BAD_REQUEST, code.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            AppError::Database(detail) => {
                error!(target: "database", error = %detail, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Internal(detail) => {
                error!(target: "internal", error = %detail, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": code }))).into_response()
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    /// Unified rejection for bad email or password; the code never reveals
    /// which of the two was wrong.
    pub fn invalid_credentials() -> Self {
        Self::CredentialsRejected("INVALID_CREDENTIALS")
    }

    /// Login attempt by a deactivated account.
    pub fn user_inactive() -> Self {
        Self::CredentialsRejected("USER_INACTIVE")
    }

    pub fn forbidden(code: impl Into<String>) -> Self {
        Self::Forbidden(code.into())
    }

    pub fn validation(code: impl Into<String>) -> Self {
        Self::Validation(code.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(detail: impl Into<String>) -> Self {
        Self::Database(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            // Missing targets of mutations carry a domain code and map to
            // 400, matching the panel's contract (PISO_NO_ENCONTRADO etc.)
            RepoError::NotFound(code) => AppError::Validation(code),
            RepoError::Duplicate(code) => AppError::Validation(code),
            RepoError::Validation(code) => AppError::Validation(code),
            RepoError::Database(detail) => AppError::Database(detail),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Repo(repo) => repo.into(),
            // Business-rule violations surface their colon-delimited code;
            // routes that want a human-readable message match the variant
            // before this conversion runs.
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;
