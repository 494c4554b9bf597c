use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated image attached to a chat. Append-only, like messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatImage {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible ID
    pub public_id: String,
    /// Chat this image belongs to
    pub chat_id: i64,
    /// Image URL
    pub url: String,
    /// Prompt the image was generated from
    pub prompt: String,
    /// Creation timestamp
    pub created_at: String,
}

/// Request to append an image to a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendImageRequest {
    pub url: String,
    pub prompt: String,
}

impl ChatImage {
    /// Create a new image instance
    pub fn new(chat_id: i64, url: String, prompt: String) -> Self {
        Self {
            id: 0, // Will be set by database
            public_id: Uuid::new_v4().to_string(),
            chat_id,
            url,
            prompt,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

impl AppendImageRequest {
    /// Validate the append request
    pub fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("Image URL must be a valid HTTP/HTTPS URL".to_string());
        }

        if self.url.len() > 500 {
            return Err("Image URL too long (max 500 characters)".to_string());
        }

        if self.prompt.trim().is_empty() {
            return Err("Image prompt cannot be empty".to_string());
        }

        if self.prompt.len() > 1_000 {
            return Err("Image prompt too long (max 1,000 characters)".to_string());
        }

        Ok(())
    }
}
