use serde::{Deserialize, Serialize};

/// A catalog track. `external_id` is the identity; other fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub external_id: String,
    pub title: String,
    pub artist: String,
    pub preview_url: String,
    pub album_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JamendoResponse {
    #[serde(default)]
    pub headers: Option<JamendoHeaders>,
    #[serde(default)]
    pub results: Vec<JamendoApiTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JamendoHeaders {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub results_count: u64,
}

/// Jamendo sends ids as strings, older endpoints as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum JamendoId {
    Text(String),
    Number(u64),
}

impl From<JamendoId> for String {
    fn from(id: JamendoId) -> Self {
        match id {
            JamendoId::Text(s) => s,
            JamendoId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JamendoApiTrack {
    pub id: JamendoId,
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<JamendoApiTrack> for Track {
    fn from(t: JamendoApiTrack) -> Self {
        Self {
            external_id: t.id.into(),
            title: t.name,
            artist: t.artist_name,
            preview_url: t.audio,
            album_image: t.image.filter(|url| !url.is_empty()),
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

#[cfg(test)]
impl Track {
    pub fn mock(external_id: &str) -> Self {
        Self {
            external_id: external_id.to_string(),
            title: format!("Track {}", external_id),
            artist: "Mock Artist".to_string(),
            preview_url: format!("https://mp3l.jamendo.com/?trackid={}", external_id),
            album_image: None,
        }
    }
}
