use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message within a chat. Messages are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible ID
    pub public_id: String,
    /// Chat this message belongs to
    pub chat_id: i64,
    /// Who authored the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
}

/// Message role enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl From<&str> for MessageRole {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "assistant" => MessageRole::Assistant,
            _ => MessageRole::User,
        }
    }
}

impl From<MessageRole> for String {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => "user".to_string(),
            MessageRole::Assistant => "assistant".to_string(),
        }
    }
}

/// Request to append a message to a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendMessageRequest {
    /// Message text
    pub content: String,
    /// Message role
    pub role: MessageRole,
}

impl ChatMessage {
    /// Create a new message instance
    pub fn new(chat_id: i64, role: MessageRole, content: String) -> Self {
        Self {
            id: 0, // Will be set by database
            public_id: Uuid::new_v4().to_string(),
            chat_id,
            role,
            content,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Check if this is a user message
    pub fn is_user(&self) -> bool {
        matches!(self.role, MessageRole::User)
    }

    /// Check if this is an assistant message
    pub fn is_assistant(&self) -> bool {
        matches!(self.role, MessageRole::Assistant)
    }
}

impl AppendMessageRequest {
    /// Validate the append request
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Message content cannot be empty".to_string());
        }

        if self.content.len() > 10_000 {
            return Err("Message content too long (max 10,000 characters)".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let message = ChatMessage::new(1, MessageRole::User, "Hello!".to_string());

        assert_eq!(message.chat_id, 1);
        assert_eq!(message.content, "Hello!");
        assert!(message.is_user());
        assert!(!message.is_assistant());
    }

    #[test]
    fn test_message_role_conversion() {
        assert_eq!(MessageRole::from("user"), MessageRole::User);
        assert_eq!(MessageRole::from("assistant"), MessageRole::Assistant);
        assert_eq!(MessageRole::from("ASSISTANT"), MessageRole::Assistant);
        assert_eq!(MessageRole::from("unknown"), MessageRole::User);

        assert_eq!(String::from(MessageRole::User), "user");
        assert_eq!(String::from(MessageRole::Assistant), "assistant");
    }

    #[test]
    fn test_append_request_validation() {
        let valid = AppendMessageRequest {
            content: "Hello".to_string(),
            role: MessageRole::User,
        };
        assert!(valid.validate().is_ok());

        let empty = AppendMessageRequest {
            content: "   ".to_string(),
            role: MessageRole::User,
        };
        assert!(empty.validate().is_err());

        let oversized = AppendMessageRequest {
            content: "a".repeat(10_001),
            role: MessageRole::Assistant,
        };
        assert!(oversized.validate().is_err());
    }
}
