use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Server state - shared handles for all request handlers
///
/// Built once at process start and injected by the router; repositories
/// receive the database handle from here rather than reaching for any
/// process-global connection.
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | config | Config | immutable configuration |
/// | db | Surreal<Db> | embedded database handle |
/// | jwt_service | Arc<JwtService> | token sign/verify service |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Assemble a state from already-built parts. Tests use this with an
    /// in-memory database; production goes through [`initialize`].
    ///
    /// [`initialize`]: ServerState::initialize
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the server state: open the database under
    /// `config.data_dir` and construct the JWT service.
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let db_service = DbService::open(&config.data_dir)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
