use serde::{Deserialize, Serialize};

/// Tags extracted from a mood description. Casing is whatever the extractor returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTags {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl MoodTags {
    pub fn new<G, M, K>(genres: G, moods: M, keywords: K) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
            moods: moods.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.moods.is_empty() && self.keywords.is_empty()
    }
}

impl std::fmt::Display for MoodTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "genres=[{}] moods=[{}] keywords=[{}]",
            self.genres.join(", "),
            self.moods.join(", "),
            self.keywords.join(", ")
        )
    }
}
