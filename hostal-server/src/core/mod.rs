//! Core module - server configuration, state and error definitions
//!
//! - [`Config`] - process configuration, loaded once at startup
//! - [`ServerState`] - shared handles passed to every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup/runtime error

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, InventoryPolicy};
pub use error::{ConfigError, Result, ServerError};
pub use server::Server;
pub use state::ServerState;
