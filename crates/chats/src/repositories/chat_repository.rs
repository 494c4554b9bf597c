//! Repository for chat data access operations.

use crate::entities::Chat;
use crate::types::{ChatError, ChatResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for chat database operations
#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    /// Create a new chat repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a chat by its public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> ChatResult<Option<Chat>> {
        let row = sqlx::query(
            "SELECT id, public_id, user_id, character_id, created_at, updated_at
             FROM chats WHERE public_id = ?",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_chat(&row)).transpose()
    }

    /// List a user's chats with one character, most recently updated first
    pub async fn list_by_user_and_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> ChatResult<Vec<Chat>> {
        let rows = sqlx::query(
            "SELECT id, public_id, user_id, character_id, created_at, updated_at
             FROM chats WHERE user_id = ? AND character_id = ?
             ORDER BY updated_at DESC, id DESC",
        )
        .bind(user_id)
        .bind(character_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_chat).collect()
    }

    /// Create a new chat for a user and character
    pub async fn create(&self, user_id: i64, character_id: i64) -> ChatResult<Chat> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO chats (public_id, user_id, character_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(user_id)
        .bind(character_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint failed") {
                ChatError::CharacterNotFound
            } else {
                ChatError::DatabaseError(e.to_string())
            }
        })?;

        let chat_id = result.last_insert_rowid();

        info!(
            chat_id = chat_id,
            public_id = %public_id,
            user_id = user_id,
            character_id = character_id,
            "created new chat"
        );

        Ok(Chat {
            id: chat_id,
            public_id,
            user_id,
            character_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Bump a chat's updated_at, returning the new timestamp
    pub async fn touch(&self, chat_id: i64) -> ChatResult<String> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("UPDATE chats SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(chat_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        Ok(now)
    }

    /// Delete a chat; messages and images go with it via FK cascade
    pub async fn delete(&self, public_id: &str) -> ChatResult<()> {
        sqlx::query("DELETE FROM chats WHERE public_id = ?")
            .bind(public_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        info!(public_id = public_id, "deleted chat");

        Ok(())
    }
}

fn row_to_chat(row: &SqliteRow) -> ChatResult<Chat> {
    Ok(Chat {
        id: row
            .try_get("id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        character_id: row
            .try_get("character_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
    })
}
