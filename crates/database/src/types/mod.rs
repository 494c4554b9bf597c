//! Shared types and result types for the database layer

pub mod errors;

pub use errors::DatabaseError;

/// Common result type for database setup operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
