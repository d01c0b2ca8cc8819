use std::collections::HashSet;

use crate::jamendo::Track;

/// Ordered, capped, deduplicating track list built up across search passes.
///
/// Tracks keep the position of their first discovery. Later duplicates of an
/// `external_id` are dropped, and nothing is appended once `capacity` is reached.
#[derive(Debug)]
pub struct PlaylistAccumulator {
    capacity: usize,
    tracks: Vec<Track>,
    seen: HashSet<String>,
}

impl PlaylistAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tracks: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Merge candidates, returning how many were appended.
    pub fn merge(&mut self, candidates: impl IntoIterator<Item = Track>) -> usize {
        let before = self.tracks.len();

        for track in candidates {
            if self.is_full() {
                break;
            }
            if self.seen.insert(track.external_id.clone()) {
                self.tracks.push(track);
            }
        }

        self.tracks.len() - before
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.tracks.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}
