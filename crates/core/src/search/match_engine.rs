//! Multi-strategy symbol matching.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::search_model::{MatchType, SearchResult};
use crate::catalog::Asset;
use crate::constants::{
    FUZZY_DISTANCE_THRESHOLD, FUZZY_MATCH_LIMIT, PREFIX_MATCH_LIMIT, PREFIX_MATCH_SCORE,
};

/// Pluggable approximate string matcher.
///
/// Any metric with monotone distance semantics works: 0 means identical,
/// larger means further apart, and the engine keeps candidates whose
/// distance stays under its threshold.
pub trait ApproximateMatcher: Send + Sync {
    /// Normalized distance between `query` and `candidate` in [0, 1].
    fn distance(&self, query: &str, candidate: &str) -> f64;
}

/// Default matcher: normalized Damerau-Levenshtein distance.
///
/// Transpositions count as a single edit, so swapped-letter typos
/// ("BCT" for "BTC") stay close.
#[derive(Default)]
pub struct EditDistanceMatcher;

impl ApproximateMatcher for EditDistanceMatcher {
    fn distance(&self, query: &str, candidate: &str) -> f64 {
        1.0 - strsim::normalized_damerau_levenshtein(query, candidate)
    }
}

/// Pure ranking function over a catalog snapshot.
///
/// Matching runs three strategies in order, de-duplicating against
/// already collected symbols at each stage, then applies one stable sort
/// keyed on (match-type priority, score). The engine holds no mutable
/// state and performs no I/O.
pub struct MatchEngine {
    matcher: Box<dyn ApproximateMatcher>,
    fuzzy_threshold: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(Box::new(EditDistanceMatcher), FUZZY_DISTANCE_THRESHOLD)
    }
}

impl MatchEngine {
    pub fn new(matcher: Box<dyn ApproximateMatcher>, fuzzy_threshold: f64) -> Self {
        Self {
            matcher,
            fuzzy_threshold,
        }
    }

    /// Ranks catalog symbols against `query`.
    ///
    /// The query is trimmed and upper-cased first; a query that
    /// normalizes to empty yields no results (the controller builds the
    /// empty-query fallback list itself).
    pub fn matches(&self, query: &str, catalog: &[Asset]) -> Vec<SearchResult> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        // Exact
        if let Some(asset) = catalog.iter().find(|a| a.symbol == query) {
            seen.insert(asset.symbol.as_str());
            results.push(SearchResult::new(&asset.symbol, 0.0, MatchType::Exact));
        }

        // Prefix, in catalog order
        for asset in catalog
            .iter()
            .filter(|a| a.symbol.starts_with(&query) && a.symbol != query)
            .take(PREFIX_MATCH_LIMIT)
        {
            seen.insert(asset.symbol.as_str());
            results.push(SearchResult::new(
                &asset.symbol,
                PREFIX_MATCH_SCORE,
                MatchType::Prefix,
            ));
        }

        // Fuzzy: closest first, skipping anything already collected
        let mut fuzzy: Vec<(f64, &Asset)> = catalog
            .iter()
            .filter(|a| !seen.contains(a.symbol.as_str()))
            .filter_map(|a| {
                let distance = self.matcher.distance(&query, &a.symbol);
                (distance <= self.fuzzy_threshold).then_some((distance, a))
            })
            .collect();
        fuzzy.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        fuzzy.truncate(FUZZY_MATCH_LIMIT);
        for (distance, asset) in fuzzy {
            results.push(SearchResult::new(&asset.symbol, distance, MatchType::Fuzzy));
        }

        // Stable, so residual ties keep discovery order
        results.sort_by(|a, b| {
            a.match_type
                .priority()
                .cmp(&b.match_type.priority())
                .then_with(|| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
        });

        results
    }
}
