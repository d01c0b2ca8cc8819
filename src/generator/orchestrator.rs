use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extractor::{GeminiTagExtractor, MoodTags, TagExtractor};
use crate::jamendo::{JamendoClient, Track};
use crate::resolver::TrackResolver;

pub const DEFAULT_PLAYLIST_SIZE: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlaylist {
    pub user_input: String,
    pub tags: MoodTags,
    pub tracks: Vec<Track>,
}

/// Free text in, bounded playlist out.
pub struct PlaylistGenerator {
    extractor: Arc<dyn TagExtractor>,
    resolver: TrackResolver,
}

impl PlaylistGenerator {
    pub fn new(extractor: Arc<dyn TagExtractor>, resolver: TrackResolver) -> Self {
        Self {
            extractor,
            resolver,
        }
    }

    /// Wire up the Gemini extractor and the Jamendo catalog from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = GeminiTagExtractor::new(config)?;
        let catalog = JamendoClient::new(config)?;

        Ok(Self::new(
            Arc::new(extractor),
            TrackResolver::new(Arc::new(catalog)),
        ))
    }

    pub fn resolver(&self) -> &TrackResolver {
        &self.resolver
    }

    pub async fn extract_tags(&self, user_input: &str) -> Result<MoodTags> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(AppError::InvalidInput("User input is required".into()));
        }
        self.extractor.extract(user_input).await
    }

    pub async fn generate(&self, user_input: &str, limit: usize) -> Result<GeneratedPlaylist> {
        let tags = self.extract_tags(user_input).await?;
        info!("Generating playlist of up to {} tracks for {}", limit, tags);

        let tracks = self.resolver.resolve_tags(&tags, limit).await;
        if tracks.is_empty() {
            warn!("Every search tier came back empty for: {}", user_input.trim());
            return Err(AppError::EmptyResult);
        }

        Ok(GeneratedPlaylist {
            user_input: user_input.trim().to_string(),
            tags,
            tracks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::StaticTagExtractor;
    use crate::resolver::catalog::scripted::{BrokenCatalog, ScriptedCatalog};
    use crate::resolver::{Popularity, TagMatch};

    const GYM: &str = "Hitting the gym hard today, need something aggressive";

    fn generator(catalog: Arc<dyn crate::resolver::TrackCatalog>) -> PlaylistGenerator {
        PlaylistGenerator::new(
            Arc::new(StaticTagExtractor::with_examples()),
            TrackResolver::new(catalog),
        )
    }

    #[tokio::test]
    async fn test_gym_text_searches_metal_energetic_first() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .then_ids(&["101", "102"])
                .then_ids(&["102", "103"]),
        );
        let playlist = generator(catalog.clone()).generate(GYM, 24).await.unwrap();

        assert_eq!(playlist.tags.genres, vec!["metal", "electronic"]);
        assert_eq!(playlist.tags.moods, vec!["energetic", "heavy"]);
        assert_eq!(playlist.tags.keywords, vec!["workout", "gym"]);

        let calls = catalog.calls();
        assert_eq!(calls[0].tag_expression, "metal+energetic");
        assert_eq!(calls[0].tag_match, TagMatch::Exact);
        assert_eq!(calls[0].order_by, Popularity::Week);
        assert_eq!(calls[0].result_limit, 24);

        let ids: Vec<_> = playlist.tracks.iter().map(|t| t.external_id.as_str()).collect();
        assert_eq!(ids, vec!["101", "102", "103"]);
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_extraction() {
        let catalog = Arc::new(ScriptedCatalog::new());
        let err = generator(catalog.clone()).generate("   ", 24).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_extractor_failure_skips_search() {
        let catalog = Arc::new(ScriptedCatalog::new());
        let err = generator(catalog.clone())
            .generate("something the stub has never seen", 24)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Service(_)));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_tiers_are_empty_result() {
        let catalog = Arc::new(BrokenCatalog::default());
        let err = generator(catalog.clone()).generate(GYM, 24).await.unwrap_err();

        assert!(matches!(err, AppError::EmptyResult));
        assert_eq!(*catalog.calls.lock().unwrap(), 6);
    }
}
