//! Watchlist service - add, remove, and refresh tracked symbols.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{debug, warn};

use coinwatch_market_data::{ExchangeProvider, MarketDataError};

use super::watchlist_model::{decode_stored, StoredWatchlist, WatchlistEntry, WATCHLIST_SCHEMA_VERSION};
use crate::constants::{QUOTE_ASSET, WATCHLIST_STORAGE_KEY};
use crate::errors::{Error, Result, ValidationError};
use crate::storage::KeyValueStore;

/// Maintains the set of tracked symbols and their cached prices.
///
/// Membership changes validate against the live exchange; price
/// refreshes are best-effort per symbol so one delisted pair cannot
/// blank the rest of the list.
pub struct WatchlistService {
    provider: Arc<dyn ExchangeProvider>,
    store: Arc<dyn KeyValueStore>,
    entries: Mutex<Vec<WatchlistEntry>>,
}

impl WatchlistService {
    pub fn new(provider: Arc<dyn ExchangeProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            provider,
            store,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Restores the persisted watchlist, migrating the legacy layout.
    /// A missing or unreadable blob leaves the list empty.
    pub async fn load(&self) {
        match self.store.get(WATCHLIST_STORAGE_KEY).await {
            Ok(Some(raw)) => match decode_stored(&raw) {
                Some(entries) => {
                    debug!("Loaded {} watchlist entries", entries.len());
                    *self.entries.lock().unwrap() = entries;
                }
                None => warn!("Discarding unreadable watchlist blob"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to load watchlist: {}", e),
        }
    }

    /// Current entries in insertion order.
    pub fn entries(&self) -> Vec<WatchlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Adds `symbol` after confirming the exchange trades its pair.
    ///
    /// The input is trimmed and upper-cased. Rejects empty input and
    /// duplicates before touching the network.
    pub async fn add(&self, symbol: &str) -> Result<WatchlistEntry> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }
        if self
            .entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.symbol == symbol)
        {
            return Err(ValidationError::DuplicateSymbol(symbol).into());
        }

        let pair = format!("{}{}", symbol, QUOTE_ASSET);
        let ticker = match self.provider.ticker_price(&pair).await {
            Ok(ticker) => ticker,
            Err(MarketDataError::SymbolNotFound(_)) => {
                return Err(ValidationError::SymbolNotFound(symbol).into());
            }
            Err(e) => return Err(Error::MarketData(e)),
        };

        let entry = WatchlistEntry {
            symbol: symbol.clone(),
            price: Some(ticker.price),
            previous_price: None,
            last_updated: Some(Utc::now()),
        };
        self.entries.lock().unwrap().push(entry.clone());
        self.persist().await;
        Ok(entry)
    }

    /// Removes `symbol`; returns whether it was present.
    pub async fn remove(&self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        let removed = {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.symbol != symbol);
            entries.len() != before
        };
        if removed {
            self.persist().await;
        }
        removed
    }

    /// Fetches a fresh price for every entry.
    ///
    /// Each success rotates the old price into `previous_price`; a
    /// per-symbol failure logs and keeps that entry's last known price.
    pub async fn refresh_prices(&self) {
        let symbols: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.symbol.clone())
            .collect();

        for symbol in symbols {
            let pair = format!("{}{}", symbol, QUOTE_ASSET);
            match self.provider.ticker_price(&pair).await {
                Ok(ticker) => {
                    let mut entries = self.entries.lock().unwrap();
                    if let Some(entry) = entries.iter_mut().find(|e| e.symbol == symbol) {
                        entry.previous_price = entry.price;
                        entry.price = Some(ticker.price);
                        entry.last_updated = Some(Utc::now());
                    }
                }
                Err(e) => warn!("Price refresh failed for {}: {}", symbol, e),
            }
        }
        self.persist().await;
    }

    /// Best-effort persistence; the in-memory list stays authoritative.
    async fn persist(&self) {
        let stored = StoredWatchlist {
            version: WATCHLIST_SCHEMA_VERSION,
            entries: self.entries.lock().unwrap().clone(),
        };
        let raw = match serde_json::to_string(&stored) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode watchlist: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(WATCHLIST_STORAGE_KEY, &raw).await {
            warn!("Failed to persist watchlist: {}", e);
        }
    }
}
