//! Shared wire types for the Hostal admin panel
//!
//! Types in this crate cross the HTTP boundary: request/response DTOs and
//! the closed enums the server and any client must agree on. Database
//! models live in the server crate; only what travels on the wire lives
//! here.

pub mod client;
pub mod models;

pub use client::{
    CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, RegisterAdminRequest,
    SessionResponse, SystemStatusResponse, UpdateUserRequest, UserInfo, UserSummary,
};
pub use models::{MovementType, PaymentMethod, RoleName, RoomStatus};
