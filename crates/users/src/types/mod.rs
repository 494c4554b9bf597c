//! Shared types for the users crate

pub mod errors;

pub use errors::{AuthError, UserError};

pub type UserResult<T> = Result<T, UserError>;
pub type AuthResult<T> = Result<T, AuthError>;
