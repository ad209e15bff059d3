//! Watchlist models and the persisted wire format.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current persisted schema version.
pub(crate) const WATCHLIST_SCHEMA_VERSION: u32 = 1;

/// One tracked symbol with its last two observed prices.
///
/// `previous_price` carries the price from the refresh before last, so
/// the UI can render an up/down indicator without keeping history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    /// Uppercase base-asset ticker
    pub symbol: String,

    #[serde(default)]
    pub price: Option<Decimal>,

    #[serde(default)]
    pub previous_price: Option<Decimal>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl WatchlistEntry {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: None,
            previous_price: None,
            last_updated: None,
        }
    }
}

/// Versioned envelope the watchlist persists under its storage key.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredWatchlist {
    pub version: u32,
    pub entries: Vec<WatchlistEntry>,
}

/// Decodes a persisted watchlist blob, migrating the legacy layout.
///
/// Early releases stored a flat JSON array of symbol strings. Those
/// symbols come back as entries with no price data; the next refresh
/// fills them in.
pub(crate) fn decode_stored(raw: &str) -> Option<Vec<WatchlistEntry>> {
    if let Ok(stored) = serde_json::from_str::<StoredWatchlist>(raw) {
        return Some(stored.entries);
    }
    serde_json::from_str::<Vec<String>>(raw)
        .ok()
        .map(|symbols| symbols.into_iter().map(WatchlistEntry::new).collect())
}
