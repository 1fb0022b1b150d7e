//! User (staff) Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserSummary};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{PersonCreate, PersonStatus, PersonUpdate, User, UserCreate, UserUpdate};
use crate::db::repository::{UserRepository, record_id};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult, now_millis};

/// GET /api/users - staff listing enriched with person and role data
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserSummary>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;

    let mut summaries = Vec::with_capacity(users.len());
    for user in users {
        let user_id = user
            .id
            .as_ref()
            .ok_or_else(|| AppError::internal("user record without id"))?;

        let person = repo.find_person_by_user_id(user_id).await?;
        let role = repo
            .find_role_by_id(&user.role)
            .await?
            .ok_or_else(|| AppError::internal("user points at a missing role record"))?;

        let (first_name, last_name, phone, document) = match person {
            Some(p) => (p.first_name, p.last_name, p.phone, p.document),
            None => Default::default(),
        };

        summaries.push(UserSummary {
            id: user_id.to_string(),
            email: user.email,
            is_active: user.is_active,
            role: role.name,
            first_name,
            last_name,
            phone,
            document,
            created_at: user.created_at,
        });
    }

    Ok(Json(summaries))
}

/// POST /api/users - create a staff member with its person profile
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_required_text(&req.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&req.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&req.document, "document", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.get_db());
    repo.save(
        UserCreate {
            email: req.email,
            password_hash,
            role: req.role,
        },
        PersonCreate {
            first_name: req.first_name,
            last_name: req.last_name,
            document: req.document,
            phone: req.phone,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// PATCH /api/users/{id} - update account and/or profile fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }

    let repo = UserRepository::new(state.get_db());

    // Role changes require the role record to exist already; user update
    // is not the place to mint new roles.
    let role_id = match req.role {
        Some(name) => {
            let role = repo
                .find_role_by_name(name)
                .await?
                .ok_or_else(|| AppError::validation("ROLE_NOT_FOUND"))?;
            Some(
                role.id
                    .ok_or_else(|| AppError::internal("role record without id"))?,
            )
        }
        None => None,
    };

    let user = repo
        .update_user(
            &id,
            UserUpdate {
                email: req.email,
                role: role_id,
                is_active: req.is_active,
            },
        )
        .await?;

    let user_id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("user record without id"))?;

    let status = req.is_active.map(|active| {
        if active {
            PersonStatus::Active
        } else {
            PersonStatus::Inactive
        }
    });

    repo.update_person(
        user_id,
        PersonUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            document: req.document,
            phone: req.phone,
            status,
        },
    )
    .await?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// DELETE /api/users/{id} - soft delete; admins cannot delete themselves
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if current.id == record_id("user", &id).to_string() {
        return Err(AppError::validation("CANNOT_DELETE_SELF"));
    }

    let repo = UserRepository::new(state.get_db());
    repo.soft_delete(&id, now_millis()).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
