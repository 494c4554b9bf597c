//! Companion Database Crate
//!
//! Connection management and schema migrations for the Companion backend.
//! Domain crates own their repositories; this crate only hands out a ready
//! SQLite pool.

use sqlx::SqlitePool;

use companion_config::DatabaseConfig;

pub mod connection;
pub mod migrations;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;
pub use types::{DatabaseError, DatabaseResult};

/// Open the database and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
