pub mod history;
pub mod orchestrator;

pub use history::{HistoryStore, QueryRecord};
pub use orchestrator::{DEFAULT_PLAYLIST_SIZE, GeneratedPlaylist, PlaylistGenerator};
