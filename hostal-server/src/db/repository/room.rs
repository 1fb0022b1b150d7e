//! Room Repository

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::RoomStatus;

use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All rooms ordered by code
    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room ORDER BY code")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_floor(&self, floor_id: &str) -> RepoResult<Vec<Room>> {
        let floor = record_id("floor", floor_id).to_string();
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room WHERE floor = $floor ORDER BY code")
            .bind(("floor", floor))
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let room: Option<Room> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(room)
    }

    /// Find a room by code within a floor (codes repeat across floors).
    pub async fn find_by_code(&self, code: &str, floor_id: &str) -> RepoResult<Option<Room>> {
        let code = code.to_string();
        let floor = record_id("floor", floor_id).to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE code = $code AND floor = $floor LIMIT 1")
            .bind(("code", code))
            .bind(("floor", floor))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    /// Create a room. Status starts AVAILABLE; the price is inherited
    /// from the room type by the caller.
    pub async fn create(&self, data: RoomCreate, base_price: Decimal) -> RepoResult<Room> {
        if self.find_by_code(&data.code, &data.floor_id).await?.is_some() {
            return Err(RepoError::Duplicate(
                "CODIGO_YA_EXISTE_EN_ESTE_PISO".to_string(),
            ));
        }

        let now = now_millis();
        let room = Room {
            id: None,
            code: data.code,
            floor: record_id("floor", &data.floor_id),
            room_type: record_id("room_type", &data.type_id),
            status: RoomStatus::Available,
            base_price,
            description: data.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("HABITACION_NO_ENCONTRADA".to_string()))?;

        #[derive(Serialize)]
        struct RoomUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<RoomStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = RoomUpdateDb {
            status: data.status,
            description: data.description,
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

        let updated: Option<Room> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("HABITACION_NO_ENCONTRADA".to_string()))
    }

    /// Set the room status. Any status may follow any other.
    pub async fn update_status(&self, id: &str, status: RoomStatus) -> RepoResult<Room> {
        self.update(
            id,
            RoomUpdate {
                status: Some(status),
                description: None,
                is_active: None,
            },
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let _: Option<Room> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{FloorCreate, RoomTypeCreate};
    use crate::db::repository::{FloorRepository, RoomTypeRepository};

    async fn seed(db: &Surreal<Db>) -> (String, String, Decimal) {
        let floor = FloorRepository::new(db.clone())
            .create(FloorCreate {
                number: 1,
                name: "Piso 1".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let room_type = RoomTypeRepository::new(db.clone())
            .create(RoomTypeCreate {
                name: "Simple".to_string(),
                description: None,
                base_price: Decimal::new(5000, 2),
                capacity: 1,
                extra_person_price: Decimal::new(1500, 2),
            })
            .await
            .unwrap();

        (
            floor.id.unwrap().to_string(),
            room_type.id.unwrap().to_string(),
            room_type.base_price,
        )
    }

    #[tokio::test]
    async fn room_code_is_unique_per_floor() {
        let db = DbService::open_memory().await.unwrap().db;
        let rooms = RoomRepository::new(db.clone());
        let (floor_id, type_id, price) = seed(&db).await;

        rooms
            .create(
                RoomCreate {
                    code: "101".to_string(),
                    floor_id: floor_id.clone(),
                    type_id: type_id.clone(),
                    description: None,
                },
                price,
            )
            .await
            .unwrap();

        let err = rooms
            .create(
                RoomCreate {
                    code: "101".to_string(),
                    floor_id,
                    type_id,
                    description: None,
                },
                price,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(code) if code == "CODIGO_YA_EXISTE_EN_ESTE_PISO"));
    }

    #[tokio::test]
    async fn new_rooms_start_available_and_inherit_price() {
        let db = DbService::open_memory().await.unwrap().db;
        let rooms = RoomRepository::new(db.clone());
        let (floor_id, type_id, price) = seed(&db).await;

        let room = rooms
            .create(
                RoomCreate {
                    code: "102".to_string(),
                    floor_id,
                    type_id,
                    description: None,
                },
                price,
            )
            .await
            .unwrap();

        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.base_price, price);
    }

    #[tokio::test]
    async fn status_moves_freely_between_states() {
        let db = DbService::open_memory().await.unwrap().db;
        let rooms = RoomRepository::new(db.clone());
        let (floor_id, type_id, price) = seed(&db).await;

        let room = rooms
            .create(
                RoomCreate {
                    code: "103".to_string(),
                    floor_id,
                    type_id,
                    description: None,
                },
                price,
            )
            .await
            .unwrap();
        let id = room.id.unwrap().to_string();

        for status in [
            RoomStatus::Occupied,
            RoomStatus::Cleaning,
            RoomStatus::Maintenance,
            RoomStatus::Available,
        ] {
            let updated = rooms.update_status(&id, status).await.unwrap();
            assert_eq!(updated.status, status);
        }
    }
}
