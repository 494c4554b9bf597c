//! Character catalog REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::AuthUserId;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CharacterResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub personality: String,
    pub avatar_url: Option<String>,
    pub is_preset: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<companion_characters::Character> for CharacterResponse {
    fn from(character: companion_characters::Character) -> Self {
        let is_preset = character.is_preset();
        Self {
            id: character.public_id,
            name: character.name,
            description: character.description,
            personality: character.personality,
            avatar_url: character.avatar_url,
            is_preset,
            created_at: character.created_at,
            updated_at: character.updated_at,
        }
    }
}

/// Create character routes
pub fn create_character_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/api/characters",
            axum::routing::get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/:character_id",
            axum::routing::get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
}

#[utoipa::path(
    get,
    path = "/api/characters",
    tag = "Characters",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Presets plus the caller's characters", body = Vec<CharacterResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_characters(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<Json<Vec<CharacterResponse>>> {
    let characters = state.character_service.list(user_id).await?;

    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/characters",
    tag = "Characters",
    security(("bearer_token" = [])),
    request_body = CreateCharacterRequest,
    responses(
        (status = 201, description = "Character created", body = CharacterResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn create_character(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<CreateCharacterRequest>,
) -> GatewayResult<impl IntoResponse> {
    let request = companion_characters::CreateCharacterRequest {
        name: payload.name,
        description: payload.description,
        personality: payload.personality,
        avatar_url: payload.avatar_url,
    };

    let character = state.character_service.create(user_id, &request).await?;

    Ok((StatusCode::CREATED, Json(CharacterResponse::from(character))))
}

#[utoipa::path(
    get,
    path = "/api/characters/{character_id}",
    tag = "Characters",
    security(("bearer_token" = [])),
    params(
        ("character_id" = String, Path, description = "Character public ID")
    ),
    responses(
        (status = 200, description = "Character details", body = CharacterResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    )
)]
pub async fn get_character(
    Path(character_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<CharacterResponse>> {
    let character = state.character_service.get(&character_id).await?;

    Ok(Json(CharacterResponse::from(character)))
}

#[utoipa::path(
    put,
    path = "/api/characters/{character_id}",
    tag = "Characters",
    security(("bearer_token" = [])),
    params(
        ("character_id" = String, Path, description = "Character public ID")
    ),
    request_body = UpdateCharacterRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner, or a preset", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    )
)]
pub async fn update_character(
    Path(character_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<UpdateCharacterRequest>,
) -> GatewayResult<Json<CharacterResponse>> {
    let request = companion_characters::UpdateCharacterRequest {
        name: payload.name,
        description: payload.description,
        personality: payload.personality,
        avatar_url: payload.avatar_url,
    };

    let character = state
        .character_service
        .update(&character_id, user_id, &request)
        .await?;

    Ok(Json(CharacterResponse::from(character)))
}

#[utoipa::path(
    delete,
    path = "/api/characters/{character_id}",
    tag = "Characters",
    security(("bearer_token" = [])),
    params(
        ("character_id" = String, Path, description = "Character public ID")
    ),
    responses(
        (status = 204, description = "Character deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner, or a preset", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    )
)]
pub async fn delete_character(
    Path(character_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<impl IntoResponse> {
    state
        .character_service
        .delete(&character_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
