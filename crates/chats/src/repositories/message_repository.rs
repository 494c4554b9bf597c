//! Repository for message data access operations.

use crate::entities::{ChatMessage, MessageRole};
use crate::types::{ChatError, ChatResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a chat's messages in insertion order.
    ///
    /// `id` breaks ties between messages created within the same instant, so
    /// replaying a conversation always yields the same order.
    pub async fn list_by_chat(&self, chat_id: i64) -> ChatResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            "SELECT id, public_id, chat_id, role, content, created_at
             FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_message).collect()
    }

    /// Fetch the first message of a chat, for list previews
    pub async fn first_for_chat(&self, chat_id: i64) -> ChatResult<Option<ChatMessage>> {
        let row = sqlx::query(
            "SELECT id, public_id, chat_id, role, content, created_at
             FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC LIMIT 1",
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_message(&row)).transpose()
    }

    /// Append a message to a chat
    pub async fn append(
        &self,
        chat_id: i64,
        role: MessageRole,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO messages (public_id, chat_id, role, content, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(chat_id)
        .bind(String::from(role))
        .bind(content)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        let message_id = result.last_insert_rowid();

        info!(
            message_id = message_id,
            chat_id = chat_id,
            role = %String::from(role),
            "appended message"
        );

        Ok(ChatMessage {
            id: message_id,
            public_id,
            chat_id,
            role,
            content: content.to_string(),
            created_at: now,
        })
    }
}

fn row_to_message(row: &SqliteRow) -> ChatResult<ChatMessage> {
    let role: String = row
        .try_get("role")
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

    Ok(ChatMessage {
        id: row
            .try_get("id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        chat_id: row
            .try_get("chat_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        role: MessageRole::from(role.as_str()),
        content: row
            .try_get("content")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
    })
}
