//! Repository for session data access operations.

use crate::entities::AuthSession;
use crate::types::{AuthError, AuthResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for session database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a session for a user with the given lifetime
    pub async fn create(&self, user_id: i64, ttl_seconds: u64) -> AuthResult<AuthSession> {
        let token = cuid2::cuid();
        let now = chrono::Utc::now();
        let expires_at = now + chrono::Duration::seconds(ttl_seconds.min(i64::MAX as u64) as i64);
        let now = now.to_rfc3339();
        let expires_at = expires_at.to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO sessions (user_id, token, created_at, expires_at, last_used_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(&now)
        .bind(&expires_at)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        info!(user_id = user_id, "created new session");

        Ok(AuthSession {
            id: result.last_insert_rowid(),
            user_id,
            token,
            created_at: now.clone(),
            expires_at,
            last_used_at: now,
        })
    }

    /// Find a session by its token
    pub async fn find_by_token(&self, token: &str) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query(
            "SELECT id, user_id, token, created_at, expires_at, last_used_at
             FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_session(&row)).transpose()
    }

    /// Record that the token was just presented
    pub async fn update_last_used(&self, token: &str) -> AuthResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("UPDATE sessions SET last_used_at = ? WHERE token = ?")
            .bind(&now)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Delete a session by its token
    pub async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Delete all sessions for a user, returning how many were removed
    pub async fn delete_by_user_id(&self, user_id: i64) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete all sessions whose expiry has passed
    pub async fn delete_expired(&self) -> AuthResult<u64> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        if result.rows_affected() > 0 {
            info!(count = result.rows_affected(), "cleaned up expired sessions");
        }

        Ok(result.rows_affected())
    }
}

fn row_to_session(row: &SqliteRow) -> AuthResult<AuthSession> {
    Ok(AuthSession {
        id: row
            .try_get("id")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        token: row
            .try_get("token")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        expires_at: row
            .try_get("expires_at")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        last_used_at: row
            .try_get("last_used_at")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_sessions.db");
        let db_url = format!("sqlite://{}", db_path.display());

        std::fs::File::create(&db_path).unwrap();
        let pool = SqlitePool::connect(&db_url).await.unwrap();

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
    async fn test_create_and_find_session() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let session = repo.create(1, 3600).await.unwrap();
        assert!(!session.token.is_empty());
        assert!(!session.is_expired());

        let found = repo.find_by_token(&session.token).await.unwrap().unwrap();
        assert_eq!(found.user_id, 1);
        assert_eq!(found.token, session.token);
    }

    #[tokio::test]
    async fn test_delete_by_token() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let session = repo.create(1, 3600).await.unwrap();
        repo.delete_by_token(&session.token).await.unwrap();

        assert!(repo.find_by_token(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        let expired = repo.create(1, 0).await.unwrap();
        let live = repo.create(2, 3600).await.unwrap();

        // Let the zero-TTL session fall behind `now`.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let removed = repo.delete_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(repo.find_by_token(&expired.token).await.unwrap().is_none());
        assert!(repo.find_by_token(&live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_by_user_id() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = SessionRepository::new(pool);

        repo.create(1, 3600).await.unwrap();
        repo.create(1, 3600).await.unwrap();
        repo.create(2, 3600).await.unwrap();

        let removed = repo.delete_by_user_id(1).await.unwrap();
        assert_eq!(removed, 2);
    }
}
