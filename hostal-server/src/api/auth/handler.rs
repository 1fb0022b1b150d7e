//! Authentication Handlers

use axum::{Extension, Json, extract::State, http::StatusCode};

use shared::{
    LoginRequest, LoginResponse, MessageResponse, RegisterAdminRequest, RoleName, SessionResponse,
    SystemStatusResponse, UserInfo,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{PersonCreate, User, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// POST /api/auth/login
///
/// Authenticates credentials and returns a signed session token. The
/// rejection code never distinguishes a wrong email from a wrong
/// password.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_db());

    let user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::user_inactive());
    }

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let role = repo
        .find_role_by_id(&user.role)
        .await?
        .ok_or_else(|| AppError::internal("user points at a missing role record"))?;

    let user_id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("user record without id"))?;

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, role.name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user_id, email = %user.email, role = %role.name, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email,
            role: role.name,
        },
    }))
}

/// POST /api/auth/register
///
/// First-run admin registration. Succeeds exactly once: as soon as an
/// ADMIN user exists the system counts as initialized and every further
/// attempt is refused.
pub async fn register_admin(
    State(state): State<ServerState>,
    Json(req): Json<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_required_text(&req.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&req.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&req.document, "document", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = UserRepository::new(state.get_db());

    if repo.is_initialized().await? {
        return Err(AppError::forbidden("SYSTEM_ALREADY_INITIALIZED"));
    }

    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let created = repo
        .save(
            UserCreate {
                email: req.email,
                password_hash,
                role: RoleName::Admin,
            },
            PersonCreate {
                first_name: req.first_name,
                last_name: req.last_name,
                document: req.document,
                phone: req.phone,
            },
        )
        .await?;

    tracing::info!(email = %created.email, "System initialized with first admin");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Admin registered successfully")),
    ))
}

/// GET /api/auth/system-status
pub async fn system_status(
    State(state): State<ServerState>,
) -> AppResult<Json<SystemStatusResponse>> {
    let repo = UserRepository::new(state.get_db());
    let initialized = repo.is_initialized().await?;
    Ok(Json(SystemStatusResponse { initialized }))
}

/// GET /api/verify-session
///
/// Reaching this handler means the middleware already re-derived the
/// user from the database; echo the fresh identity back.
pub async fn verify_session(
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<SessionResponse>> {
    Ok(Json(SessionResponse {
        valid: true,
        user: user.info(),
    }))
}
