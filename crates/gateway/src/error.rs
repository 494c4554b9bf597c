//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::AuthorizationFailed(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::InternalError(_) | GatewayError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = json!({
            "error": status.as_str(),
            "message": self.to_string(),
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convert from domain error types
impl From<companion_users::UserError> for GatewayError {
    fn from(error: companion_users::UserError) -> Self {
        use companion_users::UserError;

        match error {
            UserError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists => {
                GatewayError::Conflict("Email already exists".to_string())
            }
            UserError::InvalidEmail => {
                GatewayError::InvalidRequest("Invalid email format".to_string())
            }
            UserError::ValidationError(msg) => GatewayError::InvalidRequest(msg),
            UserError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<companion_users::AuthError> for GatewayError {
    fn from(error: companion_users::AuthError) -> Self {
        use companion_users::AuthError;

        match error {
            AuthError::InvalidToken => {
                GatewayError::AuthenticationFailed("Invalid token".to_string())
            }
            AuthError::SessionExpired => {
                GatewayError::AuthenticationFailed("Session expired".to_string())
            }
            AuthError::User(user_error) => user_error.into(),
            AuthError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<companion_characters::CharacterError> for GatewayError {
    fn from(error: companion_characters::CharacterError) -> Self {
        use companion_characters::CharacterError;

        match error {
            CharacterError::CharacterNotFound => {
                GatewayError::NotFound("Character not found".to_string())
            }
            CharacterError::AccessDenied => {
                GatewayError::AuthorizationFailed("Access denied".to_string())
            }
            CharacterError::PresetImmutable => GatewayError::AuthorizationFailed(
                "Preset characters cannot be modified".to_string(),
            ),
            CharacterError::InvalidInput(msg) => GatewayError::InvalidRequest(msg),
            CharacterError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<companion_chats::ChatError> for GatewayError {
    fn from(error: companion_chats::ChatError) -> Self {
        use companion_chats::ChatError;

        match error {
            ChatError::ChatNotFound => GatewayError::NotFound("Chat not found".to_string()),
            ChatError::CharacterNotFound => {
                GatewayError::NotFound("Character not found".to_string())
            }
            ChatError::AccessDenied => {
                GatewayError::AuthorizationFailed("Access denied".to_string())
            }
            ChatError::InvalidInput(msg) => GatewayError::InvalidRequest(msg),
            ChatError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        GatewayError::InvalidRequest(format!("JSON serialization error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::AuthenticationFailed("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::AuthorizationFailed("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            GatewayError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_error_mapping() {
        let err: GatewayError = companion_chats::ChatError::ChatNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: GatewayError = companion_users::UserError::EmailAlreadyExists.into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: GatewayError = companion_users::AuthError::SessionExpired.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: GatewayError = companion_characters::CharacterError::PresetImmutable.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
