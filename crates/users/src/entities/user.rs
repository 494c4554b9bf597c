use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible ID
    pub public_id: String,
    /// User email address
    pub email: String,
    /// Display name shown in chat replies (empty until onboarding)
    pub display_name: String,
    /// Self-reported gender
    pub gender: Gender,
    /// Whether the user has saved their preferences at least once
    pub has_completed_onboarding: bool,
    /// When the user was created
    pub created_at: String,
    /// When the user was last updated
    pub updated_at: String,
}

/// Gender enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unspecified,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ => Gender::Unspecified,
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => "male".to_string(),
            Gender::Female => "female".to_string(),
            Gender::Other => "other".to_string(),
            Gender::Unspecified => "unspecified".to_string(),
        }
    }
}

/// Request to update user preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    /// New display name (optional)
    pub display_name: Option<String>,
    /// New gender (optional)
    pub gender: Option<Gender>,
    /// Explicit onboarding flag; a save with this unset still completes onboarding
    pub has_completed_onboarding: Option<bool>,
}

impl User {
    /// Create a new user instance
    pub fn new(email: String) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be set by database
            public_id: Uuid::new_v4().to_string(),
            email,
            display_name: String::new(),
            gender: Gender::Unspecified,
            has_completed_onboarding: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The name to interpolate into replies, if any
    pub fn reply_name(&self) -> Option<&str> {
        let trimmed = self.display_name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Update the timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }
}

impl UpdatePreferencesRequest {
    /// Validate the update request
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref display_name) = self.display_name {
            if display_name.len() > 100 {
                return Err("Display name too long (max 100 characters)".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("demo@example.com".to_string());

        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.gender, Gender::Unspecified);
        assert!(!user.has_completed_onboarding);
        assert!(user.display_name.is_empty());
        assert!(user.reply_name().is_none());
        assert!(!user.public_id.is_empty());
    }

    #[test]
    fn test_gender_conversion() {
        assert_eq!(Gender::from("male"), Gender::Male);
        assert_eq!(Gender::from("Female"), Gender::Female);
        assert_eq!(Gender::from("other"), Gender::Other);
        assert_eq!(Gender::from("unspecified"), Gender::Unspecified);
        assert_eq!(Gender::from("unknown"), Gender::Unspecified);

        assert_eq!(String::from(Gender::Male), "male");
        assert_eq!(String::from(Gender::Female), "female");
        assert_eq!(String::from(Gender::Other), "other");
        assert_eq!(String::from(Gender::Unspecified), "unspecified");
    }

    #[test]
    fn test_reply_name() {
        let mut user = User::new("demo@example.com".to_string());
        assert!(user.reply_name().is_none());

        user.display_name = "  ".to_string();
        assert!(user.reply_name().is_none());

        user.display_name = "Alex".to_string();
        assert_eq!(user.reply_name(), Some("Alex"));
    }

    #[test]
    fn test_update_preferences_validation() {
        let valid = UpdatePreferencesRequest {
            display_name: Some("Alex".to_string()),
            gender: Some(Gender::Other),
            has_completed_onboarding: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = UpdatePreferencesRequest {
            display_name: Some("a".repeat(101)),
            gender: None,
            has_completed_onboarding: None,
        };
        assert!(invalid.validate().is_err());
    }
}
