//! Symbol catalog service.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, error, warn};

use coinwatch_market_data::ExchangeProvider;

use super::catalog_model::Asset;
use crate::constants::{COIN_LIST_STORAGE_KEY, QUOTE_ASSET};
use crate::storage::KeyValueStore;
use crate::validation::ValidityCache;

/// In-memory snapshot of all tradable base assets.
///
/// The snapshot is replaced atomically on [`refresh`](Self::refresh);
/// readers holding the previous `Arc` keep a consistent view. A refresh
/// also primes the [`ValidityCache`] with every listed base asset and
/// persists the snapshot so the next start can serve results before the
/// first network round-trip completes.
pub struct SymbolCatalog {
    provider: Arc<dyn ExchangeProvider>,
    store: Arc<dyn KeyValueStore>,
    validity: Arc<ValidityCache>,
    assets: RwLock<Arc<Vec<Asset>>>,
}

impl SymbolCatalog {
    /// Creates a new catalog with an empty snapshot.
    pub fn new(
        provider: Arc<dyn ExchangeProvider>,
        store: Arc<dyn KeyValueStore>,
        validity: Arc<ValidityCache>,
    ) -> Self {
        Self {
            provider,
            store,
            validity,
            assets: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Asset>> {
        self.assets.read().unwrap().clone()
    }

    /// Best-effort restore of the last persisted snapshot.
    ///
    /// A missing, unreadable, or malformed blob leaves the catalog empty;
    /// the next refresh overwrites whatever was loaded.
    pub async fn load_cached(&self) {
        let blob = match self.store.get(COIN_LIST_STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read cached coin list: {}", e);
                return;
            }
        };

        match serde_json::from_str::<Vec<Asset>>(&blob) {
            Ok(cached) => {
                debug!("Restored {} cached catalog entries", cached.len());
                *self.assets.write().unwrap() = Arc::new(cached);
            }
            Err(e) => {
                error!("Cached coin list is malformed, ignoring: {}", e);
            }
        }
    }

    /// Fetches the full exchange listing and 24h statistics, and replaces
    /// the snapshot with one [`Asset`] per spot-tradable USDT pair.
    ///
    /// On success the validity cache is primed with every returned base
    /// asset and its clock is reset. On any fetch or parse failure the
    /// previous snapshot stays in place and an empty list is returned;
    /// refresh failures are non-fatal by design.
    pub async fn refresh(&self) -> Vec<Asset> {
        let symbols = match self.provider.exchange_info().await {
            Ok(symbols) => symbols,
            Err(e) => {
                error!("Catalog refresh failed fetching exchange info: {}", e);
                return Vec::new();
            }
        };

        let tickers = match self.provider.tickers_24h().await {
            Ok(tickers) => tickers,
            Err(e) => {
                error!("Catalog refresh failed fetching 24h tickers: {}", e);
                return Vec::new();
            }
        };

        // Pair symbol -> (volume, price change %)
        let ticker_map: HashMap<String, (f64, f64)> = tickers
            .into_iter()
            .map(|t| (t.symbol, (t.volume, t.price_change_percent)))
            .collect();

        let assets: Vec<Asset> = symbols
            .into_iter()
            .filter(|s| s.is_spot_tradable(QUOTE_ASSET) && !s.base_asset.is_empty())
            .map(|s| {
                let (volume, change) = ticker_map.get(&s.symbol).copied().unwrap_or((0.0, 0.0));
                Asset::new(s.base_asset, s.quote_asset, volume, change)
            })
            .collect();

        self.validity
            .prime(assets.iter().map(|a| a.symbol.clone()));

        *self.assets.write().unwrap() = Arc::new(assets.clone());
        debug!("Catalog refreshed with {} assets", assets.len());

        self.persist(&assets).await;

        assets
    }

    async fn persist(&self, assets: &[Asset]) {
        let blob = match serde_json::to_string(assets) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize coin list: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(COIN_LIST_STORAGE_KEY, &blob).await {
            warn!("Failed to persist coin list: {}", e);
        }
    }
}
