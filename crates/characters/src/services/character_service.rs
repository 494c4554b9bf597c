//! Character catalog service.

use crate::catalog::PRESET_CHARACTERS;
use crate::entities::{Character, CreateCharacterRequest, UpdateCharacterRequest};
use crate::repositories::CharacterRepository;
use crate::types::{CharacterError, CharacterResult};
use sqlx::SqlitePool;

/// Service for character catalog operations
pub struct CharacterService {
    character_repository: CharacterRepository,
}

impl CharacterService {
    /// Create a new character service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            character_repository: CharacterRepository::new(pool),
        }
    }

    /// List the characters visible to a user: presets plus their own
    pub async fn list(&self, user_id: i64) -> CharacterResult<Vec<Character>> {
        self.character_repository.list_visible_to(user_id).await
    }

    /// Fetch a character by public ID
    pub async fn get(&self, public_id: &str) -> CharacterResult<Character> {
        self.character_repository
            .find_by_public_id(public_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound)
    }

    /// Fetch a character by database ID
    pub async fn get_by_id(&self, id: i64) -> CharacterResult<Character> {
        self.character_repository
            .find_by_id(id)
            .await?
            .ok_or(CharacterError::CharacterNotFound)
    }

    /// Create a character owned by the user
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateCharacterRequest,
    ) -> CharacterResult<Character> {
        request
            .validate()
            .map_err(CharacterError::InvalidInput)?;

        self.character_repository.create(user_id, request).await
    }

    /// Update a character the user owns
    pub async fn update(
        &self,
        public_id: &str,
        user_id: i64,
        request: &UpdateCharacterRequest,
    ) -> CharacterResult<Character> {
        request
            .validate()
            .map_err(CharacterError::InvalidInput)?;

        self.character_repository
            .update(public_id, user_id, request)
            .await
    }

    /// Delete a character the user owns
    pub async fn delete(&self, public_id: &str, user_id: i64) -> CharacterResult<()> {
        self.character_repository.delete(public_id, user_id).await
    }

    /// Seed the built-in preset library; safe to call repeatedly
    pub async fn seed_presets(&self) -> CharacterResult<u64> {
        self.character_repository.seed_presets(PRESET_CHARACTERS).await
    }
}
