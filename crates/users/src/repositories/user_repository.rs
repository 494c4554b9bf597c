//! Repository for user data access operations.

use crate::entities::{Gender, UpdatePreferencesRequest, User};
use crate::types::{UserError, UserResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by database ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, public_id, email, display_name, gender, has_completed_onboarding, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    /// Find a user by email address
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, public_id, email, display_name, gender, has_completed_onboarding, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    /// Create a new user with default preferences
    pub async fn create(&self, email: &str) -> UserResult<User> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (public_id, email, display_name, gender, has_completed_onboarding, created_at, updated_at)
             VALUES (?, ?, '', 'unspecified', 0, ?, ?)",
        )
        .bind(&public_id)
        .bind(email)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                UserError::EmailAlreadyExists
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        let user_id = result.last_insert_rowid();

        info!(user_id = user_id, public_id = %public_id, "created new user");

        Ok(User {
            id: user_id,
            public_id,
            email: email.to_string(),
            display_name: String::new(),
            gender: Gender::Unspecified,
            has_completed_onboarding: false,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a preferences update; a save always completes onboarding unless
    /// the request explicitly says otherwise.
    pub async fn update_preferences(
        &self,
        user_id: i64,
        request: &UpdatePreferencesRequest,
    ) -> UserResult<User> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;

        let display_name = request
            .display_name
            .clone()
            .unwrap_or(user.display_name);
        let gender = request.gender.unwrap_or(user.gender);
        let has_completed_onboarding = request.has_completed_onboarding.unwrap_or(true);
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE users SET display_name = ?, gender = ?, has_completed_onboarding = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&display_name)
        .bind(String::from(gender))
        .bind(has_completed_onboarding)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        info!(user_id = user_id, "updated user preferences");

        Ok(User {
            display_name,
            gender,
            has_completed_onboarding,
            updated_at: now,
            ..user
        })
    }
}

fn row_to_user(row: &SqliteRow) -> UserResult<User> {
    let gender: String = row
        .try_get("gender")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        gender: Gender::from(gender.as_str()),
        has_completed_onboarding: row
            .try_get("has_completed_onboarding")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_users.db");
        let db_url = format!("sqlite://{}", db_path.display());

        std::fs::File::create(&db_path).unwrap();
        let pool = SqlitePool::connect(&db_url).await.unwrap();

        sqlx::query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL DEFAULT '',
                gender TEXT NOT NULL DEFAULT 'unspecified',
                has_completed_onboarding INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo.create("demo@example.com").await.unwrap();
        assert!(created.id > 0);
        assert!(!created.has_completed_onboarding);

        let by_email = repo.find_by_email("demo@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "demo@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        repo.create("demo@example.com").await.unwrap();
        let err = repo.create("demo@example.com").await.unwrap_err();
        assert!(matches!(err, UserError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_update_preferences_completes_onboarding() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo.create("demo@example.com").await.unwrap();

        let request = UpdatePreferencesRequest {
            display_name: Some("Alex".to_string()),
            gender: Some(Gender::Other),
            has_completed_onboarding: None,
        };

        let updated = repo.update_preferences(user.id, &request).await.unwrap();
        assert_eq!(updated.display_name, "Alex");
        assert_eq!(updated.gender, Gender::Other);
        assert!(updated.has_completed_onboarding);

        // And the change persisted, not just the returned value.
        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.display_name, "Alex");
        assert!(reloaded.has_completed_onboarding);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_existing_fields() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo.create("demo@example.com").await.unwrap();
        repo.update_preferences(
            user.id,
            &UpdatePreferencesRequest {
                display_name: Some("Alex".to_string()),
                gender: Some(Gender::Female),
                has_completed_onboarding: None,
            },
        )
        .await
        .unwrap();

        let updated = repo
            .update_preferences(
                user.id,
                &UpdatePreferencesRequest {
                    display_name: None,
                    gender: None,
                    has_completed_onboarding: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.display_name, "Alex");
        assert_eq!(updated.gender, Gender::Female);
    }

    #[tokio::test]
    async fn test_update_preferences_unknown_user() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let err = repo
            .update_preferences(42, &UpdatePreferencesRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::UserNotFound));
    }
}
