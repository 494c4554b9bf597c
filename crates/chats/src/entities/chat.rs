use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::ChatImage;
use super::message::ChatMessage;

/// A conversation thread pairing one user with one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible ID
    pub public_id: String,
    /// Owning user
    pub user_id: i64,
    /// Character this conversation is with
    pub character_id: i64,
    /// Creation timestamp
    pub created_at: String,
    /// Bumped whenever a message or image is appended
    pub updated_at: String,
}

/// A chat with a one-message preview, for conversation lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat: Chat,
    /// The first message of the thread, if any
    pub preview: Option<ChatMessage>,
}

/// A chat hydrated with its full history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatWithHistory {
    pub chat: Chat,
    /// Messages in insertion order
    pub messages: Vec<ChatMessage>,
    /// Images, newest first
    pub images: Vec<ChatImage>,
}

impl Chat {
    /// Create a new chat instance
    pub fn new(user_id: i64, character_id: i64) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be set by database
            public_id: Uuid::new_v4().to_string(),
            user_id,
            character_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the given user owns this chat
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Update the timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_creation() {
        let chat = Chat::new(1, 2);

        assert_eq!(chat.user_id, 1);
        assert_eq!(chat.character_id, 2);
        assert!(chat.is_owned_by(1));
        assert!(!chat.is_owned_by(2));
        assert!(!chat.public_id.is_empty());
        assert_eq!(chat.created_at, chat.updated_at);
    }

    #[test]
    fn test_touch_moves_updated_at() {
        let mut chat = Chat::new(1, 2);
        let original_updated_at = chat.updated_at.clone();

        std::thread::sleep(std::time::Duration::from_millis(2));
        chat.touch();

        assert_ne!(chat.updated_at, original_updated_at);
        assert!(chat.updated_at > original_updated_at);
    }
}
