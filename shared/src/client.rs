//! Client-facing auth and session DTOs

use serde::{Deserialize, Serialize};

use crate::models::RoleName;

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// The identity attached to a session, as re-derived from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: RoleName,
}

/// First-run admin registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAdminRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub phone: String,
}

/// Staff creation payload (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub phone: String,
    pub role: RoleName,
}

/// Staff update payload; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub role: Option<RoleName>,
    pub is_active: Option<bool>,
}

/// One row of the staff listing: user enriched with profile and role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub role: RoleName,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub document: String,
    pub created_at: i64,
}

/// `GET /api/auth/system-status` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatusResponse {
    pub initialized: bool,
}

/// `GET /api/verify-session` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub valid: bool,
    pub user: UserInfo,
}

/// Generic confirmation body for mutations that return no resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
