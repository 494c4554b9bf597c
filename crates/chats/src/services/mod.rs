//! Business logic services for chats.

pub mod chat_service;

pub use chat_service::ChatService;
