//! Chat REST endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use companion_chats::MessageRole;

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::AuthUserId;
use crate::rest::character::CharacterResponse;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub id: String,
    pub character_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatSummaryResponse {
    pub id: String,
    pub character_id: String,
    pub created_at: String,
    pub updated_at: String,
    /// The first message of the thread, if any
    pub preview: Option<MessageResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatDetailResponse {
    pub id: String,
    pub character: CharacterResponse,
    pub created_at: String,
    pub updated_at: String,
    /// Messages in insertion order
    pub messages: Vec<MessageResponse>,
    /// Images, newest first
    pub images: Vec<ImageResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: String,
    pub chat_id: String,
    pub url: String,
    pub prompt: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateChatRequest {
    /// Public ID of the character to chat with
    pub character_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListChatsQuery {
    /// Public ID of the character whose chats to list
    pub character_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppendMessageRequest {
    pub content: String,
    /// "user" or "assistant"
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
    pub reply: MessageResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppendImageRequest {
    pub url: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl MessageResponse {
    fn new(message: companion_chats::ChatMessage, chat_public_id: &str) -> Self {
        Self {
            id: message.public_id,
            chat_id: chat_public_id.to_string(),
            role: String::from(message.role),
            content: message.content,
            created_at: message.created_at,
        }
    }
}

impl ImageResponse {
    fn new(image: companion_chats::ChatImage, chat_public_id: &str) -> Self {
        Self {
            id: image.public_id,
            chat_id: chat_public_id.to_string(),
            url: image.url,
            prompt: image.prompt,
            created_at: image.created_at,
        }
    }
}

fn parse_role(role: &str) -> GatewayResult<MessageRole> {
    match role {
        "user" => Ok(MessageRole::User),
        "assistant" => Ok(MessageRole::Assistant),
        other => Err(GatewayError::InvalidRequest(format!(
            "Invalid message role: {other}"
        ))),
    }
}

/// Create chat routes
pub fn create_chat_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/api/chats",
            axum::routing::get(list_chats).post(create_chat),
        )
        .route(
            "/api/chats/:chat_id",
            axum::routing::get(get_chat).delete(delete_chat),
        )
        .route(
            "/api/chats/:chat_id/messages",
            axum::routing::post(append_message),
        )
        .route("/api/chats/:chat_id/send", axum::routing::post(send_message))
        .route(
            "/api/chats/:chat_id/images",
            axum::routing::post(append_image),
        )
        .route(
            "/api/chats/:chat_id/images/generate",
            axum::routing::post(generate_image),
        )
}

#[utoipa::path(
    get,
    path = "/api/chats",
    tag = "Chats",
    security(("bearer_token" = [])),
    params(ListChatsQuery),
    responses(
        (status = 200, description = "The caller's chats with the character, most recently updated first", body = Vec<ChatSummaryResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    )
)]
pub async fn list_chats(
    Query(params): Query<ListChatsQuery>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<Json<Vec<ChatSummaryResponse>>> {
    let character = state.character_service.get(&params.character_id).await?;

    let summaries = state.chat_service.list_chats(user_id, character.id).await?;

    let responses = summaries
        .into_iter()
        .map(|summary| {
            let chat_public_id = summary.chat.public_id.clone();
            ChatSummaryResponse {
                id: summary.chat.public_id,
                character_id: character.public_id.clone(),
                created_at: summary.chat.created_at,
                updated_at: summary.chat.updated_at,
                preview: summary
                    .preview
                    .map(|message| MessageResponse::new(message, &chat_public_id)),
            }
        })
        .collect();

    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/chats",
    tag = "Chats",
    security(("bearer_token" = [])),
    request_body = CreateChatRequest,
    responses(
        (status = 201, description = "Chat created", body = ChatResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Character not found", body = ErrorResponse)
    )
)]
pub async fn create_chat(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<CreateChatRequest>,
) -> GatewayResult<impl IntoResponse> {
    let character = state.character_service.get(&payload.character_id).await?;

    let chat = state.chat_service.create_chat(user_id, character.id).await?;

    let response = ChatResponse {
        id: chat.public_id,
        character_id: character.public_id,
        created_at: chat.created_at,
        updated_at: chat.updated_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/chats/{chat_id}",
    tag = "Chats",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    responses(
        (status = 200, description = "Chat with character, message history and images", body = ChatDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn get_chat(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<Json<ChatDetailResponse>> {
    let history = state.chat_service.get_chat(&chat_id, user_id).await?;
    let character = state
        .character_service
        .get_by_id(history.chat.character_id)
        .await?;

    let response = ChatDetailResponse {
        id: history.chat.public_id.clone(),
        character: character.into(),
        created_at: history.chat.created_at,
        updated_at: history.chat.updated_at,
        messages: history
            .messages
            .into_iter()
            .map(|message| MessageResponse::new(message, &chat_id))
            .collect(),
        images: history
            .images
            .into_iter()
            .map(|image| ImageResponse::new(image, &chat_id))
            .collect(),
    };

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/chats/{chat_id}/messages",
    tag = "Messages",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    request_body = AppendMessageRequest,
    responses(
        (status = 201, description = "Message appended", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn append_message(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<AppendMessageRequest>,
) -> GatewayResult<impl IntoResponse> {
    let request = companion_chats::AppendMessageRequest {
        content: payload.content,
        role: parse_role(&payload.role)?,
    };

    let message = state
        .chat_service
        .append_message(&chat_id, user_id, &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(message, &chat_id)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/chats/{chat_id}/send",
    tag = "Messages",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "User message appended and canned reply generated", body = SendMessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn send_message(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<SendMessageRequest>,
) -> GatewayResult<Json<SendMessageResponse>> {
    let chat = state.chat_service.find_chat(&chat_id, user_id).await?;
    let character = state.character_service.get_by_id(chat.character_id).await?;
    let user = state.user_service.get_user(user_id).await?;

    let message = state
        .chat_service
        .append_message(
            &chat_id,
            user_id,
            &companion_chats::AppendMessageRequest {
                content: payload.content.clone(),
                role: MessageRole::User,
            },
        )
        .await?;

    let reply_text = state
        .responder
        .reply(
            &character.name,
            &character.personality,
            &payload.content,
            user.reply_name(),
        )
        .await;

    let reply = state
        .chat_service
        .append_message(
            &chat_id,
            user_id,
            &companion_chats::AppendMessageRequest {
                content: reply_text,
                role: MessageRole::Assistant,
            },
        )
        .await?;

    Ok(Json(SendMessageResponse {
        message: MessageResponse::new(message, &chat_id),
        reply: MessageResponse::new(reply, &chat_id),
    }))
}

#[utoipa::path(
    post,
    path = "/api/chats/{chat_id}/images",
    tag = "Images",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    request_body = AppendImageRequest,
    responses(
        (status = 201, description = "Image appended", body = ImageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn append_image(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<AppendImageRequest>,
) -> GatewayResult<impl IntoResponse> {
    let request = companion_chats::AppendImageRequest {
        url: payload.url,
        prompt: payload.prompt,
    };

    let image = state
        .chat_service
        .append_image(&chat_id, user_id, &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ImageResponse::new(image, &chat_id)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/chats/{chat_id}/images/generate",
    tag = "Images",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    request_body = GenerateImageRequest,
    responses(
        (status = 201, description = "Placeholder image generated and appended", body = ImageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn generate_image(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<GenerateImageRequest>,
) -> GatewayResult<impl IntoResponse> {
    // Ownership check happens before the simulated delay.
    state.chat_service.find_chat(&chat_id, user_id).await?;

    let generated = state.responder.generate_image(&payload.prompt).await;

    let image = state
        .chat_service
        .append_image(
            &chat_id,
            user_id,
            &companion_chats::AppendImageRequest {
                url: generated.url,
                prompt: generated.prompt,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ImageResponse::new(image, &chat_id)),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/chats/{chat_id}",
    tag = "Chats",
    security(("bearer_token" = [])),
    params(
        ("chat_id" = String, Path, description = "Chat public ID")
    ),
    responses(
        (status = 204, description = "Chat deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Chat not found", body = ErrorResponse)
    )
)]
pub async fn delete_chat(
    Path(chat_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<impl IntoResponse> {
    state.chat_service.delete_chat(&chat_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
