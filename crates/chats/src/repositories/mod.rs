//! Data access layer for chats, messages and images.

pub mod chat_repository;
pub mod image_repository;
pub mod message_repository;

pub use chat_repository::ChatRepository;
pub use image_repository::ImageRepository;
pub use message_repository::MessageRepository;
