//! User preference service.

use crate::entities::{UpdatePreferencesRequest, User};
use crate::repositories::UserRepository;
use crate::types::{UserError, UserResult};
use sqlx::SqlitePool;

/// Service for user preference operations
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new user service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
        }
    }

    /// Fetch a user by database ID
    pub async fn get_user(&self, user_id: i64) -> UserResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Find or create a user by email (used by data seeding)
    pub async fn find_or_create(&self, email: &str) -> UserResult<User> {
        match self.user_repository.find_by_email(email).await? {
            Some(user) => Ok(user),
            None => self.user_repository.create(email).await,
        }
    }

    /// Apply a preferences update for a user
    pub async fn update_preferences(
        &self,
        user_id: i64,
        request: &UpdatePreferencesRequest,
    ) -> UserResult<User> {
        request
            .validate()
            .map_err(UserError::ValidationError)?;

        self.user_repository.update_preferences(user_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Gender;
    use tempfile::TempDir;

    async fn create_test_service() -> (UserService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_user_service.db");
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

        (UserService::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_find_or_create_is_idempotent() {
        let (service, _temp_dir) = create_test_service().await;

        let first = service.find_or_create("demo@example.com").await.unwrap();
        let second = service.find_or_create("demo@example.com").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_preferences_validates() {
        let (service, _temp_dir) = create_test_service().await;

        let user = service.find_or_create("demo@example.com").await.unwrap();

        let err = service
            .update_preferences(
                user.id,
                &UpdatePreferencesRequest {
                    display_name: Some("a".repeat(101)),
                    gender: None,
                    has_completed_onboarding: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_preferences_persists() {
        let (service, _temp_dir) = create_test_service().await;

        let user = service.find_or_create("demo@example.com").await.unwrap();
        service
            .update_preferences(
                user.id,
                &UpdatePreferencesRequest {
                    display_name: Some("Alex".to_string()),
                    gender: Some(Gender::Male),
                    has_completed_onboarding: Some(true),
                },
            )
            .await
            .unwrap();

        let reloaded = service.get_user(user.id).await.unwrap();
        assert_eq!(reloaded.display_name, "Alex");
        assert_eq!(reloaded.gender, Gender::Male);
        assert!(reloaded.has_completed_onboarding);
    }
}
