//! Search result models.

use serde::{Deserialize, Serialize};

/// How a result entered the ranked list.
///
/// The first three come from text matching against a query; the last
/// three make up the blended fallback shown for an empty query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Prefix,
    Fuzzy,
    History,
    Trending,
    Popular,
}

impl MatchType {
    /// Primary sort key; lower ranks first.
    pub const fn priority(&self) -> u8 {
        match self {
            MatchType::Exact => 0,
            MatchType::Prefix => 1,
            MatchType::Fuzzy => 2,
            MatchType::History => 3,
            MatchType::Trending => 4,
            MatchType::Popular => 5,
        }
    }
}

/// One entry of the per-query ranked list. Transient; never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Uppercase base-asset ticker
    pub symbol: String,

    /// Secondary sort key; lower = better. Exactly 0 for everything but
    /// prefix and fuzzy matches.
    pub score: f64,

    /// How this result was found
    pub match_type: MatchType,
}

impl SearchResult {
    pub fn new(symbol: impl Into<String>, score: f64, match_type: MatchType) -> Self {
        Self {
            symbol: symbol.into(),
            score,
            match_type,
        }
    }
}
