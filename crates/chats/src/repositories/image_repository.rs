//! Repository for image data access operations.

use crate::entities::ChatImage;
use crate::types::{ChatError, ChatResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for image database operations
#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

impl ImageRepository {
    /// Create a new image repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a chat's images, newest first
    pub async fn list_by_chat(&self, chat_id: i64) -> ChatResult<Vec<ChatImage>> {
        let rows = sqlx::query(
            "SELECT id, public_id, chat_id, url, prompt, created_at
             FROM images WHERE chat_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_image).collect()
    }

    /// Append an image to a chat
    pub async fn append(&self, chat_id: i64, url: &str, prompt: &str) -> ChatResult<ChatImage> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO images (public_id, chat_id, url, prompt, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(chat_id)
        .bind(url)
        .bind(prompt)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ChatError::DatabaseError(e.to_string()))?;

        let image_id = result.last_insert_rowid();

        info!(image_id = image_id, chat_id = chat_id, "appended image");

        Ok(ChatImage {
            id: image_id,
            public_id,
            chat_id,
            url: url.to_string(),
            prompt: prompt.to_string(),
            created_at: now,
        })
    }
}

fn row_to_image(row: &SqliteRow) -> ChatResult<ChatImage> {
    Ok(ChatImage {
        id: row
            .try_get("id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        chat_id: row
            .try_get("chat_id")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        url: row
            .try_get("url")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        prompt: row
            .try_get("prompt")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| ChatError::DatabaseError(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_images.db");
        let db_url = format!("sqlite://{}", db_path.display());

        std::fs::File::create(&db_path).unwrap();
        let pool = SqlitePool::connect(&db_url).await.unwrap();

        sqlx::query(
            "CREATE TABLE images (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                chat_id INTEGER NOT NULL,
                url TEXT NOT NULL,
                prompt TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_append_and_list_newest_first() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ImageRepository::new(pool);

        for i in 0..3 {
            repo.append(1, &format!("https://placekitten.com/50{i}/500"), "a kitten")
                .await
                .unwrap();
        }

        let images = repo.list_by_chat(1).await.unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].url, "https://placekitten.com/502/500");
        assert_eq!(images[2].url, "https://placekitten.com/500/500");
    }

    #[tokio::test]
    async fn test_images_are_scoped_to_chat() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ImageRepository::new(pool);

        repo.append(1, "https://placekitten.com/500/500", "one")
            .await
            .unwrap();
        repo.append(2, "https://placekitten.com/501/501", "two")
            .await
            .unwrap();

        let images = repo.list_by_chat(2).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].prompt, "two");
    }
}
