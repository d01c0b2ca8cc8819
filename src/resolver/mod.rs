pub mod catalog;
pub mod pass;
pub mod playlist;
pub mod tiers;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::extractor::MoodTags;
use crate::jamendo::Track;

pub use catalog::TrackCatalog;
pub use pass::{Popularity, SearchPass, TagMatch};
pub use playlist::PlaylistAccumulator;
pub use tiers::{Tier, TierKind, plan_tiers};

/// Resolves tags into a bounded track list by searching the catalog tier by tier.
#[derive(Clone)]
pub struct TrackResolver {
    catalog: Arc<dyn TrackCatalog>,
}

impl TrackResolver {
    pub fn new(catalog: Arc<dyn TrackCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn resolve_tags(&self, tags: &MoodTags, target_count: usize) -> Vec<Track> {
        self.resolve(&tags.genres, &tags.moods, &tags.keywords, target_count)
            .await
    }

    /// Run the tiers in order until `target_count` unique tracks are collected.
    ///
    /// Never fails: a tier whose search errors contributes nothing. Issues at most
    /// one search per tier, six in total.
    pub async fn resolve(
        &self,
        genres: &[String],
        moods: &[String],
        keywords: &[String],
        target_count: usize,
    ) -> Vec<Track> {
        let mut playlist = PlaylistAccumulator::new(target_count);

        if target_count == 0 {
            return playlist.into_tracks();
        }

        for tier in plan_tiers(genres, moods, keywords) {
            if playlist.is_full() {
                break;
            }
            self.run_tier(&tier, &mut playlist).await;
        }

        if playlist.is_empty() {
            info!("No tracks from tag tiers, falling back to '{}'", tiers::FALLBACK_TAG);
            self.run_tier(&Tier::fallback(), &mut playlist).await;
        }

        info!("Resolved {} of {} requested tracks", playlist.len(), target_count);
        playlist.into_tracks()
    }

    async fn run_tier(&self, tier: &Tier, playlist: &mut PlaylistAccumulator) {
        let pass = tier.to_pass(playlist.remaining());

        match self.catalog.search(&pass).await {
            Ok(candidates) => {
                let found = candidates.len();
                let added = playlist.merge(candidates);
                debug!(
                    tier = %tier.kind,
                    pass = %pass,
                    found,
                    added,
                    "Tier search complete"
                );
            }
            Err(e) => {
                warn!(tier = %tier.kind, pass = %pass, error = %e, "Tier search failed, skipping");
            }
        }
    }
}
