//! # Companion Characters Crate
//!
//! The character catalog for the Companion backend: a built-in preset
//! library plus user-created characters, with owner-scoped CRUD. Presets are
//! ordinary rows with no owner (`user_id IS NULL`) and are immutable through
//! the API.

pub mod catalog;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use catalog::{PresetCharacter, PRESET_CHARACTERS};
pub use entities::{Character, CreateCharacterRequest, UpdateCharacterRequest};
pub use repositories::CharacterRepository;
pub use services::CharacterService;
pub use types::{CharacterError, CharacterResult};
