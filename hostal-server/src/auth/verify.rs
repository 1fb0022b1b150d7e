//! Session verification against live database state
//!
//! [`AuthVerificationService`] is the single place where trust is
//! re-derived from persisted state. Token claims only nominate a subject
//! id; whether that subject may do anything is decided here, on every
//! request, against the current user record. A revoked, demoted or
//! deleted account loses access the moment the record changes, not when
//! its token expires.

use http::StatusCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use shared::{RoleName, UserInfo};

use crate::db::repository::{RepoError, UserRepository};

/// Denial reasons, in the order the checks run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("USER_NOT_FOUND")]
    UserNotFound,

    #[error("USER_INACTIVE")]
    UserInactive,

    #[error("USER_DELETED")]
    UserDeleted,

    #[error("ROLE_NOT_FOUND")]
    RoleNotFound,

    #[error("FORBIDDEN")]
    Forbidden,

    /// Verification itself failed (storage error). Detail is logged, not
    /// surfaced.
    #[error("INTERNAL_SECURITY_ERROR")]
    Internal(String),
}

impl VerifyError {
    /// Machine-readable reason code surfaced to the client.
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::UserNotFound => "USER_NOT_FOUND",
            VerifyError::UserInactive => "USER_INACTIVE",
            VerifyError::UserDeleted => "USER_DELETED",
            VerifyError::RoleNotFound => "ROLE_NOT_FOUND",
            VerifyError::Forbidden => "FORBIDDEN",
            VerifyError::Internal(_) => "INTERNAL_SECURITY_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VerifyError::UserNotFound => StatusCode::UNAUTHORIZED,
            VerifyError::UserInactive
            | VerifyError::UserDeleted
            | VerifyError::RoleNotFound
            | VerifyError::Forbidden => StatusCode::FORBIDDEN,
            VerifyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The freshly re-derived identity attached to a request.
///
/// Created by the authentication middleware after the database round-trip,
/// never from raw token claims.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id in "user:key" form
    pub id: String,
    pub email: String,
    pub role: RoleName,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == RoleName::Admin
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Re-validates a subject against the credential store.
#[derive(Clone)]
pub struct AuthVerificationService {
    users: UserRepository,
}

impl AuthVerificationService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Verify that `user_id` names a live, active, role-matching user.
    ///
    /// Checks run in a fixed order and short-circuit on the first failure:
    /// existence, active flag, soft-delete timestamp, role resolution,
    /// role membership in `required`.
    pub async fn verify(
        &self,
        user_id: &str,
        required: &[RoleName],
    ) -> Result<CurrentUser, VerifyError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or(VerifyError::UserNotFound)?;

        if !user.is_active {
            return Err(VerifyError::UserInactive);
        }

        if user.deleted_at.is_some() {
            return Err(VerifyError::UserDeleted);
        }

        let role = self
            .users
            .find_role_by_id(&user.role)
            .await
            .map_err(internal)?
            .ok_or(VerifyError::RoleNotFound)?;

        if !required.contains(&role.name) {
            return Err(VerifyError::Forbidden);
        }

        let id = user
            .id
            .as_ref()
            .map(|r| r.to_string())
            .ok_or_else(|| VerifyError::Internal("user record without id".to_string()))?;

        Ok(CurrentUser {
            id,
            email: user.email,
            role: role.name,
        })
    }
}

fn internal(err: RepoError) -> VerifyError {
    VerifyError::Internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{PersonCreate, UserCreate};
    use crate::utils::now_millis;

    async fn setup() -> (Surreal<Db>, AuthVerificationService) {
        let db = DbService::open_memory().await.unwrap().db;
        let service = AuthVerificationService::new(db.clone());
        (db, service)
    }

    async fn seed_user(db: &Surreal<Db>, email: &str, role: RoleName) -> String {
        let repo = UserRepository::new(db.clone());
        let user = repo
            .save(
                UserCreate {
                    email: email.to_string(),
                    password_hash: "$argon2id$fake".to_string(),
                    role,
                },
                PersonCreate {
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                    document: "00000000".to_string(),
                    phone: "999999999".to_string(),
                },
            )
            .await
            .unwrap();
        user.id.unwrap().to_string()
    }

    #[tokio::test]
    async fn unknown_subject_is_not_found() {
        let (_db, service) = setup().await;
        let result = service.verify("user:nobody", &RoleName::ALL).await;
        assert_eq!(result.unwrap_err(), VerifyError::UserNotFound);
    }

    #[tokio::test]
    async fn valid_user_passes_and_is_rederived() {
        let (db, service) = setup().await;
        let id = seed_user(&db, "recep@hostal.pe", RoleName::Receptionist).await;

        let user = service.verify(&id, &RoleName::ALL).await.unwrap();
        assert_eq!(user.email, "recep@hostal.pe");
        assert_eq!(user.role, RoleName::Receptionist);
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn inactive_user_is_rejected_regardless_of_role() {
        let (db, service) = setup().await;
        let id = seed_user(&db, "recep@hostal.pe", RoleName::Receptionist).await;

        let repo = UserRepository::new(db.clone());
        repo.set_active(&id, false).await.unwrap();

        let result = service.verify(&id, &RoleName::ALL).await;
        assert_eq!(result.unwrap_err(), VerifyError::UserInactive);
    }

    #[tokio::test]
    async fn soft_deleted_user_is_rejected_even_if_active() {
        let (db, service) = setup().await;
        let id = seed_user(&db, "recep@hostal.pe", RoleName::Receptionist).await;

        let repo = UserRepository::new(db.clone());
        repo.soft_delete(&id, now_millis()).await.unwrap();

        let result = service.verify(&id, &RoleName::ALL).await;
        assert_eq!(result.unwrap_err(), VerifyError::UserDeleted);
    }

    #[tokio::test]
    async fn role_outside_allowlist_is_forbidden() {
        let (db, service) = setup().await;
        let id = seed_user(&db, "recep@hostal.pe", RoleName::Receptionist).await;

        let result = service.verify(&id, &[RoleName::Admin]).await;
        assert_eq!(result.unwrap_err(), VerifyError::Forbidden);
    }

    #[tokio::test]
    async fn inactive_wins_over_role_mismatch() {
        // The active check runs before role membership; an inactive
        // receptionist asking for an admin route still gets USER_INACTIVE.
        let (db, service) = setup().await;
        let id = seed_user(&db, "recep@hostal.pe", RoleName::Receptionist).await;

        let repo = UserRepository::new(db.clone());
        repo.set_active(&id, false).await.unwrap();

        let result = service.verify(&id, &[RoleName::Admin]).await;
        assert_eq!(result.unwrap_err(), VerifyError::UserInactive);
    }
}
