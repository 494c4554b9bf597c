use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer session issued by the mock auth flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Database primary key
    pub id: i64,
    /// User this session belongs to
    pub user_id: i64,
    /// Opaque bearer token
    pub token: String,
    /// Creation timestamp
    pub created_at: String,
    /// Expiry timestamp
    pub expires_at: String,
    /// Last time the token was presented
    pub last_used_at: String,
}

impl AuthSession {
    /// Check whether the session has passed its expiry time.
    ///
    /// An unparseable expiry counts as expired.
    pub fn is_expired(&self) -> bool {
        match DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(expires_at) => Utc::now() > expires_at.with_timezone(&Utc),
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: String) -> AuthSession {
        AuthSession {
            id: 1,
            user_id: 1,
            token: "token".to_string(),
            created_at: Utc::now().to_rfc3339(),
            expires_at,
            last_used_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_future_expiry_is_not_expired() {
        let session = session_expiring_at((Utc::now() + Duration::hours(1)).to_rfc3339());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let session = session_expiring_at((Utc::now() - Duration::hours(1)).to_rfc3339());
        assert!(session.is_expired());
    }

    #[test]
    fn test_garbage_expiry_is_expired() {
        let session = session_expiring_at("not-a-timestamp".to_string());
        assert!(session.is_expired());
    }
}
