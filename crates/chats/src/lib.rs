//! # Companion Chats Crate
//!
//! Chat threads for the Companion backend. A chat pairs one user with one
//! character and carries an append-only, creation-ordered message history
//! plus generated images.
//!
//! - **Entities**: domain models (Chat, ChatMessage, ChatImage)
//! - **Repositories**: data access layer
//! - **Services**: business logic
//! - **Types**: shared error and result types

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{
    AppendImageRequest, AppendMessageRequest, Chat, ChatImage, ChatMessage, ChatSummary,
    ChatWithHistory, MessageRole,
};
pub use repositories::{ChatRepository, ImageRepository, MessageRepository};
pub use services::ChatService;
pub use types::{ChatError, ChatResult};
