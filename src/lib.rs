pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod jamendo;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{AppError, Result};
pub use extractor::{GeminiTagExtractor, MoodTags, StaticTagExtractor, TagExtractor};
pub use generator::{GeneratedPlaylist, HistoryStore, PlaylistGenerator, QueryRecord};
pub use jamendo::{JamendoClient, Track};
pub use resolver::{SearchPass, TrackCatalog, TrackResolver};
