//! Chat thread service.
//!
//! Every operation that reads or mutates an existing chat re-checks that the
//! caller owns it; the repositories themselves are ownership-agnostic.

use crate::entities::{
    AppendImageRequest, AppendMessageRequest, Chat, ChatImage, ChatMessage, ChatSummary,
    ChatWithHistory,
};
use crate::repositories::{ChatRepository, ImageRepository, MessageRepository};
use crate::types::{ChatError, ChatResult};
use sqlx::SqlitePool;

/// Service for chat thread operations
pub struct ChatService {
    chat_repository: ChatRepository,
    message_repository: MessageRepository,
    image_repository: ImageRepository,
}

impl ChatService {
    /// Create a new chat service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            chat_repository: ChatRepository::new(pool.clone()),
            message_repository: MessageRepository::new(pool.clone()),
            image_repository: ImageRepository::new(pool),
        }
    }

    /// Create a new chat between a user and a character
    pub async fn create_chat(&self, user_id: i64, character_id: i64) -> ChatResult<Chat> {
        self.chat_repository.create(user_id, character_id).await
    }

    /// List a user's chats with one character, each with a one-message preview
    pub async fn list_chats(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> ChatResult<Vec<ChatSummary>> {
        let chats = self
            .chat_repository
            .list_by_user_and_character(user_id, character_id)
            .await?;

        let mut summaries = Vec::with_capacity(chats.len());
        for chat in chats {
            let preview = self.message_repository.first_for_chat(chat.id).await?;
            summaries.push(ChatSummary { chat, preview });
        }

        Ok(summaries)
    }

    /// Fetch a chat with its full message history and images
    pub async fn get_chat(&self, public_id: &str, user_id: i64) -> ChatResult<ChatWithHistory> {
        let chat = self.owned_chat(public_id, user_id).await?;

        let messages = self.message_repository.list_by_chat(chat.id).await?;
        let images = self.image_repository.list_by_chat(chat.id).await?;

        Ok(ChatWithHistory {
            chat,
            messages,
            images,
        })
    }

    /// Append a message and bump the chat's updated_at
    pub async fn append_message(
        &self,
        public_id: &str,
        user_id: i64,
        request: &AppendMessageRequest,
    ) -> ChatResult<ChatMessage> {
        request.validate().map_err(ChatError::InvalidInput)?;

        let chat = self.owned_chat(public_id, user_id).await?;

        self.chat_repository.touch(chat.id).await?;
        self.message_repository
            .append(chat.id, request.role, &request.content)
            .await
    }

    /// Append an image and bump the chat's updated_at
    pub async fn append_image(
        &self,
        public_id: &str,
        user_id: i64,
        request: &AppendImageRequest,
    ) -> ChatResult<ChatImage> {
        request.validate().map_err(ChatError::InvalidInput)?;

        let chat = self.owned_chat(public_id, user_id).await?;

        self.chat_repository.touch(chat.id).await?;
        self.image_repository
            .append(chat.id, &request.url, &request.prompt)
            .await
    }

    /// Delete a chat the user owns; history cascades away with it
    pub async fn delete_chat(&self, public_id: &str, user_id: i64) -> ChatResult<()> {
        let chat = self.owned_chat(public_id, user_id).await?;
        self.chat_repository.delete(&chat.public_id).await
    }

    /// Fetch a chat without its history, enforcing ownership
    pub async fn find_chat(&self, public_id: &str, user_id: i64) -> ChatResult<Chat> {
        self.owned_chat(public_id, user_id).await
    }

    async fn owned_chat(&self, public_id: &str, user_id: i64) -> ChatResult<Chat> {
        let chat = self
            .chat_repository
            .find_by_public_id(public_id)
            .await?
            .ok_or(ChatError::ChatNotFound)?;

        if !chat.is_owned_by(user_id) {
            return Err(ChatError::AccessDenied);
        }

        Ok(chat)
    }
}
