pub mod gemini;
pub mod models;
pub mod prompt;
pub mod stub;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::GeminiTagExtractor;
pub use models::MoodTags;
pub use stub::StaticTagExtractor;

/// Turns free text into genre, mood, and keyword tags.
#[async_trait]
pub trait TagExtractor: Send + Sync {
    async fn extract(&self, user_text: &str) -> Result<MoodTags>;
}
