//! Floor Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Floor, FloorCreate, FloorUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "floor";

#[derive(Clone)]
pub struct FloorRepository {
    base: BaseRepository,
}

impl FloorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All floors ordered by number
    pub async fn find_all(&self) -> RepoResult<Vec<Floor>> {
        let floors: Vec<Floor> = self
            .base
            .db()
            .query("SELECT * FROM floor ORDER BY number")
            .await?
            .take(0)?;
        Ok(floors)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Floor>> {
        let floor: Option<Floor> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(floor)
    }

    pub async fn find_by_number(&self, number: i32) -> RepoResult<Option<Floor>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM floor WHERE number = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let floors: Vec<Floor> = result.take(0)?;
        Ok(floors.into_iter().next())
    }

    /// Create a floor; the number must be unique across the building.
    pub async fn create(&self, data: FloorCreate) -> RepoResult<Floor> {
        if self.find_by_number(data.number).await?.is_some() {
            return Err(RepoError::Duplicate(
                "EL_NUMERO_DE_PISO_YA_EXISTE".to_string(),
            ));
        }

        let now = now_millis();
        let floor = Floor {
            id: None,
            number: data.number,
            name: data.name,
            description: data.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Floor> = self.base.db().create(TABLE).content(floor).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create floor".to_string()))
    }

    pub async fn update(&self, id: &str, data: FloorUpdate) -> RepoResult<Floor> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("PISO_NO_ENCONTRADO".to_string()))?;

        // Renumbering onto an existing floor is the same violation as
        // creating one.
        if let Some(new_number) = data.number
            && new_number != existing.number
            && self.find_by_number(new_number).await?.is_some()
        {
            return Err(RepoError::Duplicate(
                "EL_NUMERO_DE_PISO_YA_EXISTE".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct FloorUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            number: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = FloorUpdateDb {
            number: data.number,
            name: data.name,
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

        let updated: Option<Floor> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("PISO_NO_ENCONTRADO".to_string()))
    }

    /// Delete a floor. Refused while any room still references it.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        if self.has_rooms(id).await? {
            return Err(RepoError::Validation(
                "NO_SE_PUEDE_ELIMINAR_PISO_CON_HABITACIONES".to_string(),
            ));
        }

        let _: Option<Floor> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }

    pub async fn has_rooms(&self, floor_id: &str) -> RepoResult<bool> {
        let floor = record_id(TABLE, floor_id).to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM room WHERE floor = $floor GROUP ALL")
            .bind(("floor", floor))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::RoomCreate;
    use crate::db::repository::{RoomRepository, RoomTypeRepository};
    use crate::db::models::RoomTypeCreate;
    use rust_decimal::Decimal;

    fn floor_create(number: i32) -> FloorCreate {
        FloorCreate {
            number,
            name: format!("Piso {number}"),
            description: None,
        }
    }

    #[tokio::test]
    async fn duplicate_floor_number_is_rejected() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = FloorRepository::new(db);

        repo.create(floor_create(1)).await.unwrap();
        let err = repo.create(floor_create(1)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(code) if code == "EL_NUMERO_DE_PISO_YA_EXISTE"));
    }

    #[tokio::test]
    async fn delete_succeeds_for_empty_floor() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = FloorRepository::new(db);

        let floor = repo.create(floor_create(2)).await.unwrap();
        let id = floor.id.unwrap().to_string();

        repo.delete(&id).await.unwrap();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_refused_while_rooms_exist() {
        let db = DbService::open_memory().await.unwrap().db;
        let floors = FloorRepository::new(db.clone());
        let types = RoomTypeRepository::new(db.clone());
        let rooms = RoomRepository::new(db);

        let floor = floors.create(floor_create(3)).await.unwrap();
        let floor_id = floor.id.unwrap().to_string();

        let room_type = types
            .create(RoomTypeCreate {
                name: "Matrimonial".to_string(),
                description: None,
                base_price: Decimal::new(8000, 2),
                capacity: 2,
                extra_person_price: Decimal::new(2000, 2),
            })
            .await
            .unwrap();

        rooms
            .create(
                RoomCreate {
                    code: "301".to_string(),
                    floor_id: floor_id.clone(),
                    type_id: room_type.id.unwrap().to_string(),
                    description: None,
                },
                room_type.base_price,
            )
            .await
            .unwrap();

        let err = floors.delete(&floor_id).await.unwrap_err();
        assert!(
            matches!(err, RepoError::Validation(code) if code == "NO_SE_PUEDE_ELIMINAR_PISO_CON_HABITACIONES")
        );

        // The floor is still there
        assert!(floors.find_by_id(&floor_id).await.unwrap().is_some());
    }
}
