use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::extractor::TagExtractor;
use crate::extractor::models::MoodTags;
use crate::extractor::prompt::FEW_SHOT_EXAMPLES;

/// Deterministic extractor backed by a fixed text → tags table.
///
/// Lookup ignores surrounding whitespace and case. Unknown text is a service error.
#[derive(Debug, Clone, Default)]
pub struct StaticTagExtractor {
    table: HashMap<String, MoodTags>,
}

impl StaticTagExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the prompt's few-shot examples.
    pub fn with_examples() -> Self {
        FEW_SHOT_EXAMPLES
            .iter()
            .fold(Self::new(), |stub, example| stub.with_entry(example.text, example.tags()))
    }

    pub fn with_entry(mut self, text: &str, tags: MoodTags) -> Self {
        self.table.insert(normalize_key(text), tags);
        self
    }
}

fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[async_trait]
impl TagExtractor for StaticTagExtractor {
    async fn extract(&self, user_text: &str) -> Result<MoodTags> {
        self.table
            .get(&normalize_key(user_text))
            .cloned()
            .ok_or_else(|| AppError::Service(format!("no tags known for {:?}", user_text)))
    }
}
