//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`logger`] - tracing setup
//! - [`validation`] - input length/format checks for CRUD handlers
//! - [`time`] - timestamp helpers

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
pub use logger::{init_logger, init_logger_with_file};
pub use time::now_millis;
