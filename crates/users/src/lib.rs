//! # Companion Users Crate
//!
//! User accounts and sessions for the Companion backend. Authentication is
//! deliberately mocked: signing in with an unknown email creates the account
//! on the spot and no credentials are stored. Sessions are opaque tokens in
//! the database with a configurable TTL.
//!
//! - **Entities**: domain models (User, AuthSession)
//! - **Repositories**: data access layer
//! - **Services**: business logic (AuthService, UserService)
//! - **Types**: shared error and result types

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{AuthSession, Gender, UpdatePreferencesRequest, User};
pub use repositories::{SessionRepository, UserRepository};
pub use services::{AuthService, UserService};
pub use types::{AuthError, AuthResult, UserError, UserResult};
