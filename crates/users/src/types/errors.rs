//! Error types for users and sessions

use thiserror::Error;

/// User-specific errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Session-specific errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Session expired")]
    SessionExpired,

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
