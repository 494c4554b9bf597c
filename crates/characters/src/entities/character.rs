use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat companion persona: a preset from the built-in library or a
/// user-created character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible ID
    pub public_id: String,
    /// Owning user; None for built-in presets
    pub user_id: Option<i64>,
    /// Character name
    pub name: String,
    /// Short blurb shown in the catalog
    pub description: String,
    /// Personality text used to flavour canned replies
    pub personality: String,
    /// Optional avatar URL
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Request to create a new character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub avatar_url: Option<String>,
}

/// Request to update a character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub avatar_url: Option<String>,
}

impl Character {
    /// Create a new character instance
    pub fn new(
        name: String,
        description: String,
        personality: String,
        avatar_url: Option<String>,
        user_id: Option<i64>,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be set by database
            public_id: Uuid::new_v4().to_string(),
            user_id,
            name,
            description,
            personality,
            avatar_url,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether this character comes from the built-in library
    pub fn is_preset(&self) -> bool {
        self.user_id.is_none()
    }

    /// Whether the given user owns this character
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

fn validate_field(label: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }

    if value.len() > max {
        return Err(format!("{label} too long (max {max} characters)"));
    }

    Ok(())
}

fn validate_avatar_url(avatar_url: &str) -> Result<(), String> {
    if !avatar_url.starts_with("http://") && !avatar_url.starts_with("https://") {
        return Err("Avatar URL must be a valid HTTP/HTTPS URL".to_string());
    }

    if avatar_url.len() > 500 {
        return Err("Avatar URL too long (max 500 characters)".to_string());
    }

    Ok(())
}

impl CreateCharacterRequest {
    /// Validate the create request
    pub fn validate(&self) -> Result<(), String> {
        validate_field("Name", &self.name, 100)?;
        validate_field("Description", &self.description, 2_000)?;
        validate_field("Personality", &self.personality, 1_000)?;

        if let Some(ref avatar_url) = self.avatar_url {
            validate_avatar_url(avatar_url)?;
        }

        Ok(())
    }
}

impl UpdateCharacterRequest {
    /// Validate the update request
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref name) = self.name {
            validate_field("Name", name, 100)?;
        }

        if let Some(ref description) = self.description {
            validate_field("Description", description, 2_000)?;
        }

        if let Some(ref personality) = self.personality {
            validate_field("Personality", personality, 1_000)?;
        }

        if let Some(ref avatar_url) = self.avatar_url {
            validate_avatar_url(avatar_url)?;
        }

        Ok(())
    }
}
