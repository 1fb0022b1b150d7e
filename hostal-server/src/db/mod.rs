//! Database Module
//!
//! Embedded SurrealDB storage. Production opens a RocksDB-backed
//! database under the configured data directory; tests use the in-memory
//! engine through [`DbService::open_memory`].

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "hostal";
const DATABASE: &str = "hostal";

/// Database service - owns the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the persistent database under `data_dir`.
    pub async fn open(data_dir: &str) -> Result<Self, AppError> {
        let path = std::path::Path::new(data_dir).join("hostal.db");
        let path = path.to_string_lossy();

        let db = Surreal::new::<RocksDb>(path.as_ref())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {}", path);

        Ok(Self { db })
    }

    /// Open a fresh in-memory database (test use).
    pub async fn open_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Ok(Self { db })
    }
}
