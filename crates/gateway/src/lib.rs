//! # Companion Gateway Crate
//!
//! The HTTP API layer for the Companion backend: REST routes over the
//! character, chat and user services, bearer-token auth middleware, and
//! OpenAPI documentation in debug builds.
//!
//! ## Architecture
//!
//! - **REST**: resource modules with their request/response DTOs
//! - **State**: shared service handles behind an `Arc`
//! - **Middleware**: session validation and request logging
//! - **Error**: domain errors mapped onto HTTP statuses

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export main types for convenience
pub use error::{GatewayError, GatewayResult};
pub use middleware::{auth_middleware, AuthUserId};
pub use state::GatewayState;

use axum::{http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let state = Arc::new(state);

    let protected = rest::create_protected_routes().layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth_middleware,
    ));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_public_routes())
        .merge(protected)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state);

    // Swagger UI is only served from debug builds
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::auth::login,
                rest::auth::register,
                rest::auth::logout,
                rest::auth::me,
                rest::character::list_characters,
                rest::character::create_character,
                rest::character::get_character,
                rest::character::update_character,
                rest::character::delete_character,
                rest::chat::list_chats,
                rest::chat::create_chat,
                rest::chat::get_chat,
                rest::chat::delete_chat,
                rest::chat::append_message,
                rest::chat::send_message,
                rest::chat::append_image,
                rest::chat::generate_image,
                rest::user::get_preferences,
                rest::user::update_preferences,
            ),
            components(
                schemas(
                    rest::health::HealthResponse,
                    rest::auth::LoginRequest,
                    rest::auth::SessionResponse,
                    rest::auth::UserResponse,
                    rest::auth::ErrorResponse,
                    rest::character::CharacterResponse,
                    rest::character::CreateCharacterRequest,
                    rest::character::UpdateCharacterRequest,
                    rest::chat::ChatResponse,
                    rest::chat::ChatSummaryResponse,
                    rest::chat::ChatDetailResponse,
                    rest::chat::MessageResponse,
                    rest::chat::ImageResponse,
                    rest::chat::CreateChatRequest,
                    rest::chat::AppendMessageRequest,
                    rest::chat::SendMessageRequest,
                    rest::chat::SendMessageResponse,
                    rest::chat::AppendImageRequest,
                    rest::chat::GenerateImageRequest,
                    rest::user::PreferencesResponse,
                    rest::user::UpdatePreferencesRequest,
                )
            ),
            tags(
                (name = "Health", description = "Service health"),
                (name = "Auth", description = "Mock authentication"),
                (name = "Characters", description = "Character catalog"),
                (name = "Chats", description = "Chat threads"),
                (name = "Messages", description = "Chat messages"),
                (name = "Images", description = "Chat images"),
                (name = "User", description = "User preferences"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
