//! Error types for character operations

use thiserror::Error;

/// Character-specific errors
#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("Character not found")]
    CharacterNotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Preset characters cannot be modified")]
    PresetImmutable,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
