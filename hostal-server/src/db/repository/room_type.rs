//! Room Type Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "room_type";

#[derive(Clone)]
pub struct RoomTypeRepository {
    base: BaseRepository,
}

impl RoomTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All room types ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<RoomType>> {
        let types: Vec<RoomType> = self
            .base
            .db()
            .query("SELECT * FROM room_type ORDER BY name")
            .await?
            .take(0)?;
        Ok(types)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RoomType>> {
        let room_type: Option<RoomType> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(room_type)
    }

    pub async fn create(&self, data: RoomTypeCreate) -> RepoResult<RoomType> {
        let now = now_millis();
        let room_type = RoomType {
            id: None,
            name: data.name,
            description: data.description,
            base_price: data.base_price,
            capacity: data.capacity,
            extra_person_price: data.extra_person_price,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<RoomType> = self.base.db().create(TABLE).content(room_type).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room type".to_string()))
    }

    pub async fn update(&self, id: &str, data: RoomTypeUpdate) -> RepoResult<RoomType> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("TIPO_DE_HABITACION_NO_ENCONTRADO".to_string()))?;

        #[derive(Serialize)]
        struct RoomTypeUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            base_price: Option<rust_decimal::Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            capacity: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            extra_person_price: Option<rust_decimal::Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = RoomTypeUpdateDb {
            name: data.name,
            description: data.description,
            base_price: data.base_price,
            capacity: data.capacity,
            extra_person_price: data.extra_person_price,
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let thing = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?
            .check()?;

        let updated: Option<RoomType> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("TIPO_DE_HABITACION_NO_ENCONTRADO".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let _: Option<RoomType> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }
}
