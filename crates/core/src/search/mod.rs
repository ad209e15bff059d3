//! Search module - match engine and debounced search controller.

mod match_engine;
mod search_model;
mod search_service;

#[cfg(test)]
mod search_service_tests;

pub use match_engine::{ApproximateMatcher, EditDistanceMatcher, MatchEngine};
pub use search_model::{MatchType, SearchResult};
pub use search_service::{SearchConfig, SearchController, SelectCallback, Selection};
