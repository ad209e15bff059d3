//! History module - bounded, recency-ranked search history.

mod history_model;
mod history_store;

pub use history_model::HistoryEntry;
pub use history_store::SearchHistoryStore;
