use crate::resolver::pass::{Popularity, SearchPass, TagMatch};

/// Generic tag searched when nothing else produced a track.
pub const FALLBACK_TAG: &str = "pop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    GenreMood,
    MoodKeyword,
    Mood,
    Genre,
    Keyword,
    Fallback,
}

impl std::fmt::Display for TierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierKind::GenreMood => write!(f, "genre+mood"),
            TierKind::MoodKeyword => write!(f, "mood+keyword"),
            TierKind::Mood => write!(f, "mood"),
            TierKind::Genre => write!(f, "genre"),
            TierKind::Keyword => write!(f, "keyword"),
            TierKind::Fallback => write!(f, "fallback"),
        }
    }
}

/// A tier before its result limit is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub kind: TierKind,
    pub tag_expression: String,
    pub tag_match: TagMatch,
    pub order_by: Popularity,
    pub boost: Option<Popularity>,
}

impl Tier {
    fn new(kind: TierKind, tag_expression: String, tag_match: TagMatch, order_by: Popularity) -> Self {
        Self {
            kind,
            tag_expression,
            tag_match,
            order_by,
            boost: None,
        }
    }

    pub fn fallback() -> Self {
        Self::new(
            TierKind::Fallback,
            FALLBACK_TAG.to_string(),
            TagMatch::Exact,
            Popularity::Total,
        )
    }

    pub fn to_pass(&self, result_limit: usize) -> SearchPass {
        SearchPass {
            tag_expression: self.tag_expression.clone(),
            tag_match: self.tag_match,
            order_by: self.order_by,
            boost: self.boost,
            result_limit,
        }
    }
}

/// First entry of a category, lower-cased. A blank first entry counts as no entry.
fn lead_term(values: &[String]) -> Option<String> {
    values
        .first()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Tiers 1-5 in execution order, skipping those whose categories are empty.
/// The universal fallback is not included; see [`Tier::fallback`].
pub fn plan_tiers(genres: &[String], moods: &[String], keywords: &[String]) -> Vec<Tier> {
    let genre = lead_term(genres);
    let mood = lead_term(moods);
    let keyword = lead_term(keywords);

    let mut tiers = Vec::with_capacity(5);

    if let (Some(g), Some(m)) = (&genre, &mood) {
        tiers.push(Tier::new(
            TierKind::GenreMood,
            format!("{}+{}", g, m),
            TagMatch::Exact,
            Popularity::Week,
        ));
    }

    if let (Some(m), Some(k)) = (&mood, &keyword) {
        tiers.push(Tier::new(
            TierKind::MoodKeyword,
            format!("{}+{}", m, k),
            TagMatch::Fuzzy,
            Popularity::Month,
        ));
    }

    // Mood outranks genre as a relevance signal, so it runs first and carries a boost.
    if let Some(m) = &mood {
        let mut tier = Tier::new(TierKind::Mood, m.clone(), TagMatch::Exact, Popularity::Week);
        tier.boost = Some(Popularity::Month);
        tiers.push(tier);
    }

    if let Some(g) = genre {
        tiers.push(Tier::new(TierKind::Genre, g, TagMatch::Exact, Popularity::Week));
    }

    if let Some(k) = keyword {
        tiers.push(Tier::new(TierKind::Keyword, k, TagMatch::Fuzzy, Popularity::Total));
    }

    tiers
}
