//! Mock authentication service.
//!
//! There is no credential storage: signing in with an unknown email creates
//! the account, which is the demo behaviour this backend preserves. Sessions
//! are real database rows so tokens survive across requests and processes.

use crate::entities::{AuthSession, User};
use crate::repositories::{SessionRepository, UserRepository};
use crate::types::{AuthError, AuthResult, UserError};
use sqlx::SqlitePool;
use tracing::info;

/// Service for the mocked login/register/logout flows
pub struct AuthService {
    user_repository: UserRepository,
    session_repository: SessionRepository,
    session_ttl_seconds: u64,
}

impl AuthService {
    /// Create a new auth service instance
    pub fn new(pool: SqlitePool, session_ttl_seconds: u64) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            session_repository: SessionRepository::new(pool),
            session_ttl_seconds,
        }
    }

    /// Sign in with an email address, creating the account if it does not exist
    pub async fn login(&self, email: &str) -> AuthResult<(AuthSession, User)> {
        let email = normalize_email(email)?;

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                info!(%email, "login with unknown email, creating account");
                self.user_repository.create(&email).await?
            }
        };

        let session = self
            .session_repository
            .create(user.id, self.session_ttl_seconds)
            .await?;

        Ok((session, user))
    }

    /// Register a new account; fails when the email is already taken
    pub async fn register(&self, email: &str) -> AuthResult<(AuthSession, User)> {
        let email = normalize_email(email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists.into());
        }

        let user = self.user_repository.create(&email).await?;
        let session = self
            .session_repository
            .create(user.id, self.session_ttl_seconds)
            .await?;

        Ok((session, user))
    }

    /// Invalidate the presented session token
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        let session = self
            .session_repository
            .find_by_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        self.session_repository.delete_by_token(&session.token).await?;
        info!(user_id = session.user_id, "session logged out");
        Ok(())
    }

    /// Validate a token and extend its last-used time
    pub async fn validate_session(&self, token: &str) -> AuthResult<AuthSession> {
        if token.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let session = self
            .session_repository
            .find_by_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if session.is_expired() {
            self.session_repository.delete_by_token(&session.token).await?;
            return Err(AuthError::SessionExpired);
        }

        self.session_repository.update_last_used(&session.token).await?;
        Ok(session)
    }

    /// Resolve the user behind a valid token
    pub async fn current_user(&self, token: &str) -> AuthResult<User> {
        let session = self.validate_session(token).await?;

        self.user_repository
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| UserError::UserNotFound.into())
    }

    /// Remove sessions whose expiry has passed
    pub async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        self.session_repository.delete_expired().await
    }
}

fn normalize_email(email: &str) -> Result<String, UserError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() || email.len() > 255 {
        return Err(UserError::InvalidEmail);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(UserError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_service() -> (AuthService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_auth.db");
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

        (AuthService::new(pool, 3600), temp_dir)
    }

    #[tokio::test]
    async fn test_login_creates_unknown_user() {
        let (service, _temp_dir) = create_test_service().await;

        let (session, user) = service.login("new@example.com").await.unwrap();
        assert_eq!(user.email, "new@example.com");
        assert!(!session.token.is_empty());

        // Logging in again reuses the same account.
        let (_, again) = service.login("new@example.com").await.unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_existing_email() {
        let (service, _temp_dir) = create_test_service().await;

        service.register("demo@example.com").await.unwrap();
        let err = service.register("demo@example.com").await.unwrap_err();
        assert!(matches!(err, AuthError::User(UserError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_email_is_normalized() {
        let (service, _temp_dir) = create_test_service().await;

        let (_, user) = service.login("  Demo@Example.COM ").await.unwrap();
        assert_eq!(user.email, "demo@example.com");
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let (service, _temp_dir) = create_test_service().await;

        for email in ["", "no-at-sign", "@missing-local", "missing-domain@"] {
            let err = service.login(email).await.unwrap_err();
            assert!(matches!(err, AuthError::User(UserError::InvalidEmail)), "{email}");
        }
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let (service, _temp_dir) = create_test_service().await;

        let (session, _) = service.login("demo@example.com").await.unwrap();
        assert!(service.validate_session(&session.token).await.is_ok());

        service.logout(&session.token).await.unwrap();

        let err = service.validate_session(&session.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_current_user_round_trip() {
        let (service, _temp_dir) = create_test_service().await;

        let (session, user) = service.login("demo@example.com").await.unwrap();
        let current = service.current_user(&session.token).await.unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, "demo@example.com");
    }
}
