//! User and Person models
//!
//! A User is the credential record; the Person row carries the profile
//! data and is created together with its User in the same transactional
//! save. Deleting a user is always a soft delete: the record keeps its
//! email reserved only until `deleted_at` is set.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::RoleName;

use super::serde_helpers;

/// User model matching the `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub email: String,
    pub password_hash: String,
    /// Link to the role record
    #[serde(with = "serde_helpers::record_id")]
    pub role: RecordId,
    pub is_active: bool,
    /// Soft-delete timestamp; a set value excludes the user everywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    /// Verify a plaintext password against the stored digest (argon2)
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a plaintext password (argon2)
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Create user payload (repository level; the password is already hashed)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub role: RoleName,
}

/// Update user payload
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub role: Option<RecordId>,
    pub is_active: Option<bool>,
}

/// Profile status, mirrored from the owning user's active flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonStatus {
    Active,
    Inactive,
}

/// Person model matching the `person` table (1:1 with user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Owning user
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub phone: String,
    pub status: PersonStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create person payload
#[derive(Debug, Clone, Deserialize)]
pub struct PersonCreate {
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub phone: String,
}

/// Update person payload
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub status: Option<PersonStatus>,
}
