//! Error types for chat operations

use thiserror::Error;

/// Chat-specific errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat not found")]
    ChatNotFound,

    #[error("Character not found")]
    CharacterNotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
