//! Integration tests for the users crate: the full mock-auth round trip
//! against a migrated-by-hand schema.

use companion_users::{AuthService, Gender, UpdatePreferencesRequest, UserService};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("users_integration.db");
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
    sqlx::query(
        "CREATE TABLE sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            token TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            last_used_at TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    (pool, temp_dir)
}

#[tokio::test]
async fn login_preferences_and_logout_flow() {
    let (pool, _temp_dir) = create_test_pool().await;
    let auth = AuthService::new(pool.clone(), 3600);
    let users = UserService::new(pool);

    // First login creates the account with untouched preferences.
    let (session, user) = auth.login("demo@example.com").await.unwrap();
    assert!(!user.has_completed_onboarding);

    // Saving preferences flips the onboarding flag.
    users
        .update_preferences(
            user.id,
            &UpdatePreferencesRequest {
                display_name: Some("Demo".to_string()),
                gender: Some(Gender::Unspecified),
                has_completed_onboarding: None,
            },
        )
        .await
        .unwrap();

    let current = auth.current_user(&session.token).await.unwrap();
    assert_eq!(current.display_name, "Demo");
    assert!(current.has_completed_onboarding);

    // Logout kills the token.
    auth.logout(&session.token).await.unwrap();
    assert!(auth.current_user(&session.token).await.is_err());
}

#[tokio::test]
async fn expired_sessions_are_rejected_and_cleaned() {
    let (pool, _temp_dir) = create_test_pool().await;
    let auth = AuthService::new(pool, 0);

    let (session, _) = auth.login("demo@example.com").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    assert!(auth.validate_session(&session.token).await.is_err());

    // The failed validation already removed the row.
    assert_eq!(auth.cleanup_expired_sessions().await.unwrap(), 0);
}
