//! Category Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(category)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let name = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE name = $name LIMIT 1")
            .bind(("name", name))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate("CATEGORY_ALREADY_EXISTS".to_string()));
        }

        let now = now_millis();
        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("CATEGORY_NOT_FOUND".to_string()))?;

        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate("CATEGORY_ALREADY_EXISTS".to_string()));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = CategoryUpdateDb {
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

        let updated: Option<Category> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("CATEGORY_NOT_FOUND".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let _: Option<Category> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(())
    }
}
