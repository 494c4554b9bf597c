//! Shared application state for the gateway

use std::sync::Arc;

use sqlx::SqlitePool;

use companion_characters::CharacterService;
use companion_chats::ChatService;
use companion_responder::Responder;
use companion_users::{AuthService, UserService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Mock authentication service
    pub auth_service: Arc<AuthService>,
    /// User preference service
    pub user_service: Arc<UserService>,
    /// Character catalog service
    pub character_service: Arc<CharacterService>,
    /// Chat thread service
    pub chat_service: Arc<ChatService>,
    /// Canned response generator
    pub responder: Arc<Responder>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool, session_ttl_seconds: u64, responder: Responder) -> Self {
        let auth_service = Arc::new(AuthService::new(pool.clone(), session_ttl_seconds));
        let user_service = Arc::new(UserService::new(pool.clone()));
        let character_service = Arc::new(CharacterService::new(pool.clone()));
        let chat_service = Arc::new(ChatService::new(pool.clone()));

        Self {
            pool,
            auth_service,
            user_service,
            character_service,
            chat_service,
            responder: Arc::new(responder),
        }
    }
}
