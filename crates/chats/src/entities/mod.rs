//! Domain entities for chats.

pub mod chat;
pub mod image;
pub mod message;

pub use chat::{Chat, ChatSummary, ChatWithHistory};
pub use image::{AppendImageRequest, ChatImage};
pub use message::{AppendMessageRequest, ChatMessage, MessageRole};
