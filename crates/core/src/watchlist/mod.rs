//! Watchlist module - tracked symbols with cached prices.

mod watchlist_model;
mod watchlist_service;

pub use watchlist_model::WatchlistEntry;
pub use watchlist_service::WatchlistService;
