//! # Companion Responder Crate
//!
//! The stand-in for a real AI backend: canned chat replies flavoured by the
//! character's personality text, and placeholder images picked at random
//! from a fixed list. Both wait a configurable simulated delay before
//! answering so the API feels like it is talking to a real model.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use companion_config::ResponderConfig;

/// Placeholder image URLs returned by [`Responder::generate_image`].
const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://placekitten.com/500/500",
    "https://placekitten.com/500/501",
    "https://placekitten.com/501/500",
    "https://placekitten.com/502/502",
    "https://placekitten.com/503/503",
];

/// A generated placeholder image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub prompt: String,
}

/// Canned response generator
#[derive(Debug, Clone)]
pub struct Responder {
    reply_delay: Duration,
    image_delay: Duration,
}

impl Responder {
    /// Create a responder from configuration
    pub fn new(config: &ResponderConfig) -> Self {
        Self {
            reply_delay: Duration::from_millis(config.reply_delay_ms),
            image_delay: Duration::from_millis(config.image_delay_ms),
        }
    }

    /// Produce a canned assistant reply.
    ///
    /// The base template echoes the input in the character's voice; a
    /// case-insensitive keyword match on the personality text picks the
    /// wrapper. When the user has a display name it is worked into the
    /// default greeting.
    pub async fn reply(
        &self,
        character_name: &str,
        personality: &str,
        input: &str,
        display_name: Option<&str>,
    ) -> String {
        tokio::time::sleep(self.reply_delay).await;

        let base = format!("As {character_name}, I'm responding to: \"{input}\"");
        let personality = personality.to_lowercase();

        let reply = if personality.contains("flirty") {
            format!(
                "*winks* Hey there! {base} And can I just say, I love our conversations! What else is on your mind? 😉"
            )
        } else if personality.contains("sassy") {
            format!("Well, well, well... {base} I mean, what did you expect me to say? 💁")
        } else if personality.contains("caring") {
            format!(
                "*smiles warmly* {base} I'm here for you, always. How are you feeling today? 💕"
            )
        } else {
            match display_name {
                Some(name) => format!("{base} How can I help you today, {name}?"),
                None => format!("{base} How can I help you today?"),
            }
        };

        debug!(character = character_name, "generated canned reply");
        reply
    }

    /// Produce a placeholder image for a prompt
    pub async fn generate_image(&self, prompt: &str) -> GeneratedImage {
        tokio::time::sleep(self.image_delay).await;

        let index = rand::thread_rng().gen_range(0..PLACEHOLDER_IMAGES.len());

        debug!(index = index, "picked placeholder image");

        GeneratedImage {
            url: PLACEHOLDER_IMAGES[index].to_string(),
            prompt: prompt.to_string(),
        }
    }
}
