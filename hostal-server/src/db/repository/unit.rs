//! Unit Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Unit, UnitCreate, UnitUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "unit";

#[derive(Clone)]
pub struct UnitRepository {
    base: BaseRepository,
}

impl UnitRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All units ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Unit>> {
        let units: Vec<Unit> = self
            .base
            .db()
            .query("SELECT * FROM unit ORDER BY name")
            .await?
            .take(0)?;
        Ok(units)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Unit>> {
        let unit: Option<Unit> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(unit)
    }

    /// Both the name and the abbreviation must be unique.
    async fn find_conflict(
        &self,
        name: &str,
        abbreviation: &str,
        exclude: Option<&str>,
    ) -> RepoResult<bool> {
        let name = name.to_string();
        let abbreviation = abbreviation.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM unit WHERE name = $name OR abbreviation = $abbr")
            .bind(("name", name))
            .bind(("abbr", abbreviation))
            .await?;
        let units: Vec<Unit> = result.take(0)?;

        let exclude = exclude.map(|id| record_id(TABLE, id).to_string());
        Ok(units.into_iter().any(|u| match (&exclude, &u.id) {
            (Some(excluded), Some(id)) => id.to_string() != *excluded,
            _ => true,
        }))
    }

    pub async fn create(&self, data: UnitCreate) -> RepoResult<Unit> {
        if self.find_conflict(&data.name, &data.abbreviation, None).await? {
            return Err(RepoError::Duplicate("UNIT_ALREADY_EXISTS".to_string()));
        }

        let now = now_millis();
        let unit = Unit {
            id: None,
            name: data.name,
            abbreviation: data.abbreviation,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Unit> = self.base.db().create(TABLE).content(unit).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create unit".to_string()))
    }

    pub async fn update(&self, id: &str, data: UnitUpdate) -> RepoResult<Unit> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("UNIT_NOT_FOUND".to_string()))?;

        let name = data.name.clone().unwrap_or_else(|| existing.name.clone());
        let abbreviation = data
            .abbreviation
            .clone()
            .unwrap_or_else(|| existing.abbreviation.clone());
        if (name != existing.name || abbreviation != existing.abbreviation)
            && self.find_conflict(&name, &abbreviation, Some(id)).await?
        {
            return Err(RepoError::Duplicate("UNIT_ALREADY_EXISTS".to_string()));
        }

        #[derive(Serialize)]
        struct UnitUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            abbreviation: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = UnitUpdateDb {
            name: data.name,
            abbreviation: data.abbreviation,
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

        let updated: Option<Unit> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("UNIT_NOT_FOUND".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let _: Option<Unit> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }
}
