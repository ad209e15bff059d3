//! Coinwatch Core - Symbol search, validation, and watchlist services.
//!
//! This crate contains the business logic for the Coinwatch watchlist
//! tool. It is UI-agnostic and storage-agnostic: rendering is the
//! embedding application's concern, and persistence goes through the
//! [`storage::KeyValueStore`] trait.
//!
//! The central piece is the search subsystem: [`catalog::SymbolCatalog`]
//! holds the tradable-symbol snapshot, [`search::MatchEngine`] ranks
//! candidates for a query, [`search::SearchController`] drives the
//! debounced input loop, [`validation::ValidityCache`] gates external
//! symbol validation, and [`history::SearchHistoryStore`] remembers what
//! the user picked before.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod history;
pub mod search;
pub mod storage;
pub mod validation;
pub mod watchlist;

// Re-export the public surface of the search subsystem
pub use catalog::{Asset, SymbolCatalog};
pub use history::{HistoryEntry, SearchHistoryStore};
pub use search::{
    ApproximateMatcher, EditDistanceMatcher, MatchEngine, MatchType, SearchConfig,
    SearchController, SearchResult, Selection,
};
pub use storage::{KeyValueStore, MemoryKeyValueStore};
pub use validation::ValidityCache;
pub use watchlist::{WatchlistEntry, WatchlistService};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
