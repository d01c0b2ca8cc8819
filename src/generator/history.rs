use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::extractor::MoodTags;
use crate::jamendo::Track;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: u64,
    pub user_input: String,
    pub generated_tags: MoodTags,
    pub track_ids: Vec<String>,
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    next_id: u64,
    #[serde(default)]
    tracks: BTreeMap<String, Track>,
    #[serde(default)]
    queries: Vec<QueryRecord>,
}

/// JSON-file history of generated playlists. Tracks are shared between queries
/// and stored once per `external_id`.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HistoryFile> {
        if !self.path.exists() {
            return Ok(HistoryFile::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, history: &HistoryFile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn record(&self, user_input: &str, tags: &MoodTags, tracks: &[Track]) -> Result<QueryRecord> {
        let mut history = self.load()?;

        for track in tracks {
            // get-or-create: a stored track keeps its original fields
            history
                .tracks
                .entry(track.external_id.clone())
                .or_insert_with(|| track.clone());
        }

        history.next_id += 1;
        let record = QueryRecord {
            id: history.next_id,
            user_input: user_input.to_string(),
            generated_tags: tags.clone(),
            track_ids: tracks.iter().map(|t| t.external_id.clone()).collect(),
            created_at: Local::now(),
        };
        history.queries.push(record.clone());

        self.save(&history)?;
        info!("Saved query {} to {}", record.id, self.path.display());

        Ok(record)
    }

    /// Newest first.
    pub fn list(&self) -> Result<Vec<QueryRecord>> {
        let mut queries = self.load()?.queries;
        queries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(queries)
    }

    pub fn get(&self, id: u64) -> Result<(QueryRecord, Vec<Track>)> {
        let history = self.load()?;
        let record = history
            .queries
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let tracks = record
            .track_ids
            .iter()
            .filter_map(|track_id| {
                let track = history.tracks.get(track_id).cloned();
                if track.is_none() {
                    warn!("Query {} references unknown track {}", id, track_id);
                }
                track
            })
            .collect();

        Ok((record, tracks))
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut history = self.load()?;
        let before = history.queries.len();
        history.queries.retain(|q| q.id != id);

        if history.queries.len() == before {
            return Err(AppError::NotFound(id.to_string()));
        }

        self.save(&history)?;
        debug!("Deleted query {}", id);
        Ok(())
    }
}
