//! User Repository
//!
//! Owns the `user`, `person` and `role` tables. The credential store for
//! the whole auth path: login, the per-request verification service and
//! the staff CRUD all go through here.
//!
//! Record references inside documents are stored in "table:key" string
//! form; record identity (CREATE/UPDATE/DELETE targets, `db.select`) uses
//! native ids.

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use shared::RoleName;

use crate::db::models::{
    Person, PersonCreate, PersonStatus, PersonUpdate, Role, User, UserCreate, UserUpdate,
};
use crate::utils::now_millis;

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id};

const USER_TABLE: &str = "user";
const PERSON_TABLE: &str = "person";
const ROLE_TABLE: &str = "role";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ── Users ───────────────────────────────────────────────────────

    /// Find a user by id, soft-deleted ones included (the verification
    /// service needs to see them to answer USER_DELETED).
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(record_id(USER_TABLE, id)).await?;
        Ok(user)
    }

    /// Find a non-deleted user by email.
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email AND deleted_at IS NONE LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// All non-deleted users.
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE deleted_at IS NONE ORDER BY email")
            .await?
            .take(0)?;
        Ok(users)
    }

    // ── Persons ─────────────────────────────────────────────────────

    pub async fn find_person_by_user_id(&self, user_id: &RecordId) -> RepoResult<Option<Person>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM person WHERE user = $user LIMIT 1")
            .bind(("user", user_id.to_string()))
            .await?;
        let persons: Vec<Person> = result.take(0)?;
        Ok(persons.into_iter().next())
    }

    // ── Roles ───────────────────────────────────────────────────────

    pub async fn find_role_by_id(&self, id: &RecordId) -> RepoResult<Option<Role>> {
        let role: Option<Role> = self.base.db().select(id.clone()).await?;
        Ok(role)
    }

    pub async fn find_role_by_name(&self, name: RoleName) -> RepoResult<Option<Role>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM role WHERE name = $name LIMIT 1")
            .bind(("name", name.as_str()))
            .await?;
        let roles: Vec<Role> = result.take(0)?;
        Ok(roles.into_iter().next())
    }

    /// Find a role record by name, creating it lazily if absent.
    pub async fn ensure_role(&self, name: RoleName) -> RepoResult<Role> {
        if let Some(role) = self.find_role_by_name(name).await? {
            return Ok(role);
        }

        let created: Option<Role> = self
            .base
            .db()
            .create(ROLE_TABLE)
            .content(Role::new(name, now_millis()))
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create role".to_string()))
    }

    // ── System state ────────────────────────────────────────────────

    /// The system is initialized once an ADMIN role exists and at least
    /// one user holds it.
    pub async fn is_initialized(&self) -> RepoResult<bool> {
        let Some(admin_role) = self.find_role_by_name(RoleName::Admin).await? else {
            return Ok(false);
        };
        let role_id = admin_role
            .id
            .ok_or_else(|| RepoError::Database("role record without id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user WHERE role = $role GROUP ALL")
            .bind(("role", role_id.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Create a user and its person profile in one transaction, creating
    /// the role record lazily if needed.
    pub async fn save(&self, data: UserCreate, person: PersonCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate("EMAIL_ALREADY_EXISTS".to_string()));
        }

        let role = self.ensure_role(data.role).await?;
        let role_id = role
            .id
            .ok_or_else(|| RepoError::Database("role record without id".to_string()))?;

        let now = now_millis();
        let user_id = RecordId::from_table_key(USER_TABLE, new_key());

        let user = User {
            id: None,
            email: data.email,
            password_hash: data.password_hash,
            role: role_id,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        let person = Person {
            id: None,
            user: user_id.clone(),
            first_name: person.first_name,
            last_name: person.last_name,
            document: person.document,
            phone: person.phone,
            status: PersonStatus::Active,
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 CREATE ONLY $user_id CONTENT $user;
                 CREATE person CONTENT $person;
                 COMMIT TRANSACTION;",
            )
            .bind(("user_id", user_id.clone()))
            .bind(("user", user))
            .bind(("person", person))
            .await?
            .check()?;

        let created: Option<User> = self.base.db().select(user_id).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Merge the given fields into a user record.
    pub async fn update_user(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("USER_NOT_FOUND".to_string()))?;

        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate("EMAIL_ALREADY_EXISTS".to_string()));
        }

        #[derive(Serialize)]
        struct UserUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            email: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            updated_at: i64,
        }

        let update_data = UserUpdateDb {
            email: data.email,
            role: data.role.map(|r| r.to_string()),
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let thing = record_id(USER_TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?
            .check()?;

        let updated: Option<User> = self.base.db().select(thing).await?;
        updated.ok_or_else(|| RepoError::NotFound("USER_NOT_FOUND".to_string()))
    }

    /// Merge the given fields into the person attached to a user.
    pub async fn update_person(&self, user_id: &RecordId, data: PersonUpdate) -> RepoResult<()> {
        #[derive(Serialize)]
        struct PersonUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            first_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            last_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            document: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            phone: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<PersonStatus>,
            updated_at: i64,
        }

        let update_data = PersonUpdateDb {
            first_name: data.first_name,
            last_name: data.last_name,
            document: data.document,
            phone: data.phone,
            status: data.status,
            updated_at: now_millis(),
        };

        self.base
            .db()
            .query("UPDATE person MERGE $data WHERE user = $user")
            .bind(("data", update_data))
            .bind(("user", user_id.to_string()))
            .await?
            .check()?;

        Ok(())
    }

    /// Flip the active flag, mirroring it onto the person status.
    pub async fn set_active(&self, id: &str, is_active: bool) -> RepoResult<User> {
        let user = self
            .update_user(
                id,
                UserUpdate {
                    is_active: Some(is_active),
                    ..Default::default()
                },
            )
            .await?;

        if let Some(ref user_id) = user.id {
            let status = if is_active {
                PersonStatus::Active
            } else {
                PersonStatus::Inactive
            };
            self.update_person(
                user_id,
                PersonUpdate {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;
        }

        Ok(user)
    }

    /// Soft-delete: stamp `deleted_at`, freeing the email for reuse and
    /// making every subsequent verification answer USER_DELETED.
    pub async fn soft_delete(&self, id: &str, deleted_at: i64) -> RepoResult<()> {
        let existing = self.find_by_id(id).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound("USER_NOT_FOUND".to_string()));
        }

        #[derive(Serialize)]
        struct SoftDelete {
            deleted_at: i64,
            updated_at: i64,
        }

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", record_id(USER_TABLE, id)))
            .bind((
                "data",
                SoftDelete {
                    deleted_at,
                    updated_at: now_millis(),
                },
            ))
            .await?
            .check()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn admin_create(email: &str) -> (UserCreate, PersonCreate) {
        (
            UserCreate {
                email: email.to_string(),
                password_hash: "$argon2id$fake".to_string(),
                role: RoleName::Admin,
            },
            PersonCreate {
                first_name: "Ana".to_string(),
                last_name: "Quispe".to_string(),
                document: "12345678".to_string(),
                phone: "987654321".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn save_creates_user_person_and_role() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = UserRepository::new(db);

        let (user, person) = admin_create("ana@hostal.pe");
        let created = repo.save(user, person).await.unwrap();

        assert_eq!(created.email, "ana@hostal.pe");
        assert!(created.is_active);
        assert!(created.deleted_at.is_none());

        let role = repo.find_role_by_id(&created.role).await.unwrap().unwrap();
        assert_eq!(role.name, RoleName::Admin);

        let person = repo
            .find_person_by_user_id(created.id.as_ref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(person.first_name, "Ana");
        assert_eq!(person.status, PersonStatus::Active);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = UserRepository::new(db);

        let (user, person) = admin_create("ana@hostal.pe");
        repo.save(user, person).await.unwrap();

        let (user, person) = admin_create("ana@hostal.pe");
        let err = repo.save(user, person).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(code) if code == "EMAIL_ALREADY_EXISTS"));
    }

    #[tokio::test]
    async fn initialization_flips_when_first_admin_registers() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = UserRepository::new(db);

        assert!(!repo.is_initialized().await.unwrap());

        let (user, person) = admin_create("ana@hostal.pe");
        repo.save(user, person).await.unwrap();

        assert!(repo.is_initialized().await.unwrap());
    }

    #[tokio::test]
    async fn receptionist_does_not_initialize_the_system() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = UserRepository::new(db);

        let (mut user, person) = admin_create("recep@hostal.pe");
        user.role = RoleName::Receptionist;
        repo.save(user, person).await.unwrap();

        assert!(!repo.is_initialized().await.unwrap());
    }

    #[tokio::test]
    async fn soft_delete_hides_user_from_email_lookup_but_not_by_id() {
        let db = DbService::open_memory().await.unwrap().db;
        let repo = UserRepository::new(db);

        let (user, person) = admin_create("ana@hostal.pe");
        let created = repo.save(user, person).await.unwrap();
        let id = created.id.unwrap().to_string();

        repo.soft_delete(&id, now_millis()).await.unwrap();

        assert!(repo.find_by_email("ana@hostal.pe").await.unwrap().is_none());
        let by_id = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(by_id.deleted_at.is_some());
    }
}
