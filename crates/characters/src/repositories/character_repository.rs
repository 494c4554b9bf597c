//! Repository for character data access operations.

use crate::catalog::PresetCharacter;
use crate::entities::{Character, CreateCharacterRequest, UpdateCharacterRequest};
use crate::types::{CharacterError, CharacterResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Repository for character database operations
#[derive(Clone)]
pub struct CharacterRepository {
    pool: SqlitePool,
}

impl CharacterRepository {
    /// Create a new character repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a character by its public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> CharacterResult<Option<Character>> {
        let row = sqlx::query(
            "SELECT id, public_id, user_id, name, description, personality, avatar_url, created_at, updated_at
             FROM characters WHERE public_id = ?",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_character(&row)).transpose()
    }

    /// Find a character by its database ID
    pub async fn find_by_id(&self, id: i64) -> CharacterResult<Option<Character>> {
        let row = sqlx::query(
            "SELECT id, public_id, user_id, name, description, personality, avatar_url, created_at, updated_at
             FROM characters WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        row.map(|row| row_to_character(&row)).transpose()
    }

    /// List the presets plus the characters the user created
    pub async fn list_visible_to(&self, user_id: i64) -> CharacterResult<Vec<Character>> {
        let rows = sqlx::query(
            "SELECT id, public_id, user_id, name, description, personality, avatar_url, created_at, updated_at
             FROM characters WHERE user_id IS NULL OR user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_character).collect()
    }

    /// Create a new character owned by the user
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateCharacterRequest,
    ) -> CharacterResult<Character> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO characters (public_id, user_id, name, description, personality, avatar_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.personality)
        .bind(&request.avatar_url)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        let character_id = result.last_insert_rowid();

        info!(
            character_id = character_id,
            public_id = %public_id,
            user_id = user_id,
            "created new character"
        );

        Ok(Character {
            id: character_id,
            public_id,
            user_id: Some(user_id),
            name: request.name.clone(),
            description: request.description.clone(),
            personality: request.personality.clone(),
            avatar_url: request.avatar_url.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a character; only the owner may change it and presets are immutable
    pub async fn update(
        &self,
        public_id: &str,
        user_id: i64,
        request: &UpdateCharacterRequest,
    ) -> CharacterResult<Character> {
        let character = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound)?;

        if character.is_preset() {
            return Err(CharacterError::PresetImmutable);
        }

        if !character.is_owned_by(user_id) {
            return Err(CharacterError::AccessDenied);
        }

        let mut update_fields = Vec::new();
        let mut values = Vec::new();

        if let Some(name) = &request.name {
            update_fields.push("name = ?");
            values.push(name.clone());
        }

        if let Some(description) = &request.description {
            update_fields.push("description = ?");
            values.push(description.clone());
        }

        if let Some(personality) = &request.personality {
            update_fields.push("personality = ?");
            values.push(personality.clone());
        }

        if let Some(avatar_url) = &request.avatar_url {
            update_fields.push("avatar_url = ?");
            values.push(avatar_url.clone());
        }

        if update_fields.is_empty() {
            return Ok(character);
        }

        let now = chrono::Utc::now().to_rfc3339();
        update_fields.push("updated_at = ?");
        values.push(now);

        let query = format!(
            "UPDATE characters SET {} WHERE public_id = ?",
            update_fields.join(", ")
        );

        values.push(public_id.to_string());

        let mut query_builder = sqlx::query(&query);
        for value in &values {
            query_builder = query_builder.bind(value);
        }

        query_builder
            .execute(&self.pool)
            .await
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        self.find_by_public_id(public_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound)
    }

    /// Delete a user-owned character; dependent chats go with it via FK cascade
    pub async fn delete(&self, public_id: &str, user_id: i64) -> CharacterResult<()> {
        let character = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound)?;

        if character.is_preset() {
            return Err(CharacterError::PresetImmutable);
        }

        if !character.is_owned_by(user_id) {
            return Err(CharacterError::AccessDenied);
        }

        sqlx::query("DELETE FROM characters WHERE public_id = ?")
            .bind(public_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

        info!(public_id = public_id, deleted_by = user_id, "deleted character");

        Ok(())
    }

    /// Insert any catalog presets that are not in the database yet.
    ///
    /// Matching is by name among ownerless rows, so repeated seeding is a
    /// no-op. Returns the number of rows inserted.
    pub async fn seed_presets(&self, presets: &[PresetCharacter]) -> CharacterResult<u64> {
        let mut inserted = 0;

        for preset in presets {
            let existing: Option<(i64,)> = sqlx::query_as(
                "SELECT id FROM characters WHERE user_id IS NULL AND name = ?",
            )
            .bind(preset.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

            if existing.is_some() {
                continue;
            }

            let public_id = cuid2::cuid();
            let now = chrono::Utc::now().to_rfc3339();

            sqlx::query(
                "INSERT INTO characters (public_id, user_id, name, description, personality, avatar_url, created_at, updated_at)
                 VALUES (?, NULL, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&public_id)
            .bind(preset.name)
            .bind(preset.description)
            .bind(preset.personality)
            .bind(preset.avatar_url)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?;

            inserted += 1;
        }

        if inserted > 0 {
            info!(count = inserted, "seeded preset characters");
        }

        Ok(inserted)
    }
}

fn row_to_character(row: &SqliteRow) -> CharacterResult<Character> {
    Ok(Character {
        id: row
            .try_get("id")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        personality: row
            .try_get("personality")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        avatar_url: row
            .try_get("avatar_url")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| CharacterError::DatabaseError(e.to_string()))?,
    })
}
