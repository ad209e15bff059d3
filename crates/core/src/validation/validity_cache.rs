//! Two-tier symbol validity cache.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use log::debug;

use coinwatch_market_data::ExchangeProvider;

use crate::constants::{QUOTE_ASSET, VALIDATION_CACHE_TTL_SECS};

struct CacheState {
    valid: HashSet<String>,
    invalid: HashSet<String>,
    /// Single shared clock; the whole cache is fresh or stale as a unit.
    last_validation: DateTime<Utc>,
}

impl CacheState {
    fn is_fresh(&self) -> bool {
        Utc::now() - self.last_validation < Duration::seconds(VALIDATION_CACHE_TTL_SECS)
    }
}

/// Gates calls to the external trading-pair probe.
///
/// Symbols live in one of two disjoint sets, valid or invalid. Both sets
/// share one freshness clock: entries are never expired individually, and
/// only [`prime`](Self::prime) (run on catalog refresh) clears the sets
/// and resets the clock. Once the TTL lapses, cached answers are bypassed
/// and every lookup re-queries the exchange until the next refresh;
/// re-query results still land in the sets, so a symbol can move between
/// them.
pub struct ValidityCache {
    provider: Arc<dyn ExchangeProvider>,
    state: Mutex<CacheState>,
}

impl ValidityCache {
    /// Creates a cache whose clock starts now, with both sets empty.
    pub fn new(provider: Arc<dyn ExchangeProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(CacheState {
                valid: HashSet::new(),
                invalid: HashSet::new(),
                last_validation: Utc::now(),
            }),
        }
    }

    /// Clears both sets, marks `symbols` valid, and resets the clock.
    pub fn prime<I>(&self, symbols: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut state = self.state.lock().unwrap();
        state.valid = symbols.into_iter().collect();
        state.invalid.clear();
        state.last_validation = Utc::now();
        debug!("Validity cache primed with {} symbols", state.valid.len());
    }

    /// Returns whether `symbol` (a base asset, e.g. "BTC") is a valid
    /// trading pair against the reference quote asset.
    ///
    /// A fresh cached answer short-circuits the external probe. On a miss
    /// or a stale cache the exchange is queried once; any failure, network
    /// or exchange-side, classifies the symbol as invalid.
    pub async fn is_valid(&self, symbol: &str) -> bool {
        if let Some(cached) = self.cached_answer(symbol) {
            return cached;
        }

        let pair = format!("{}{}", symbol, QUOTE_ASSET);
        let valid = self.provider.check_trading_pair(&pair).await.is_ok();

        let mut state = self.state.lock().unwrap();
        if valid {
            state.invalid.remove(symbol);
            state.valid.insert(symbol.to_string());
        } else {
            state.valid.remove(symbol);
            state.invalid.insert(symbol.to_string());
        }
        valid
    }

    /// Partitions `symbols` into (valid, invalid) via [`is_valid`](Self::is_valid).
    pub async fn validate_many(&self, symbols: &[String]) -> (Vec<String>, Vec<String>) {
        let checks = symbols.iter().map(|s| async move {
            let valid = self.is_valid(s).await;
            (s.clone(), valid)
        });

        let mut valid = Vec::new();
        let mut invalid = Vec::new();
        for (symbol, ok) in join_all(checks).await {
            if ok {
                valid.push(symbol);
            } else {
                invalid.push(symbol);
            }
        }
        (valid, invalid)
    }

    fn cached_answer(&self, symbol: &str) -> Option<bool> {
        let state = self.state.lock().unwrap();
        if !state.is_fresh() {
            return None;
        }
        if state.valid.contains(symbol) {
            Some(true)
        } else if state.invalid.contains(symbol) {
            Some(false)
        } else {
            None
        }
    }

    /// Rewinds the shared clock, making the cache look `age` old.
    #[cfg(test)]
    pub(crate) fn backdate(&self, age: Duration) {
        let mut state = self.state.lock().unwrap();
        state.last_validation = Utc::now() - age;
    }
}
