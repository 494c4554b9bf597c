//! REST API endpoints for the gateway

pub mod auth;
pub mod character;
pub mod chat;
pub mod health;
pub mod user;

use axum::Router;
use std::sync::Arc;

use crate::state::GatewayState;

/// Routes that require no session token
pub fn create_public_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(health::create_health_routes())
        .merge(auth::create_public_auth_routes())
}

/// Routes behind the auth middleware
pub fn create_protected_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(auth::create_protected_auth_routes())
        .merge(character::create_character_routes())
        .merge(chat::create_chat_routes())
        .merge(user::create_user_routes())
}
