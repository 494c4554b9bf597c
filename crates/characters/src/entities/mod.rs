//! Domain entities for characters.

pub mod character;

pub use character::{Character, CreateCharacterRequest, UpdateCharacterRequest};
