//! Search history store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, warn};
use serde::{Deserialize, Serialize};

use super::history_model::HistoryEntry;
use crate::constants::{HISTORY_CAPACITY, SEARCH_HISTORY_STORAGE_KEY};
use crate::storage::KeyValueStore;

/// Persisted per-symbol record; the symbol itself is the map key.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    count: u64,
    last_searched: DateTime<Utc>,
}

/// Bounded, recency-ranked record of what the user has picked before.
///
/// Every mutation writes the whole store; every read loads it. History is
/// best-effort: storage failures and malformed blobs degrade to an empty
/// store and are only logged.
pub struct SearchHistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl SearchHistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Bumps the count for `symbol` (creating the entry on first pick)
    /// and stamps it as the most recently searched. Evicts down to the
    /// capacity, keeping the most recently searched entries.
    pub async fn record(&self, symbol: &str) {
        self.record_at(symbol, Utc::now()).await;
    }

    pub(crate) async fn record_at(&self, symbol: &str, now: DateTime<Utc>) {
        let mut entries = self.load().await;

        let entry = entries.entry(symbol.to_string()).or_insert(StoredEntry {
            count: 0,
            last_searched: now,
        });
        entry.count += 1;
        entry.last_searched = now;

        if entries.len() > HISTORY_CAPACITY {
            let mut ranked: Vec<(String, StoredEntry)> = entries.into_iter().collect();
            // Alphabetical pre-pass keeps equal timestamps deterministic
            // under the stable recency sort.
            ranked.sort_by(|a, b| a.0.cmp(&b.0));
            ranked.sort_by(|a, b| b.1.last_searched.cmp(&a.1.last_searched));
            ranked.truncate(HISTORY_CAPACITY);
            entries = ranked.into_iter().collect();
        }

        self.save(&entries).await;
    }

    /// Returns up to `n` entries ordered by `last_searched` descending.
    pub async fn top_recent(&self, n: usize) -> Vec<HistoryEntry> {
        let entries = self.load().await;

        let mut ranked: Vec<HistoryEntry> = entries
            .into_iter()
            .map(|(symbol, stored)| HistoryEntry {
                symbol,
                count: stored.count,
                last_searched: stored.last_searched,
            })
            .collect();
        ranked.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        ranked.sort_by(|a, b| b.last_searched.cmp(&a.last_searched));
        ranked.truncate(n);
        ranked
    }

    async fn load(&self) -> HashMap<String, StoredEntry> {
        let blob = match self.store.get(SEARCH_HISTORY_STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read search history: {}", e);
                return HashMap::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Search history is malformed, resetting: {}", e);
                HashMap::new()
            }
        }
    }

    async fn save(&self, entries: &HashMap<String, StoredEntry>) {
        let blob = match serde_json::to_string(entries) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize search history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(SEARCH_HISTORY_STORAGE_KEY, &blob).await {
            warn!("Failed to persist search history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use crate::storage::MemoryKeyValueStore;

    fn store() -> SearchHistoryStore {
        SearchHistoryStore::new(Arc::new(MemoryKeyValueStore::new()))
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_record_creates_entry_with_count_one() {
        let history = store();
        history.record("BTC").await;

        let top = history.top_recent(1).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].symbol, "BTC");
        assert_eq!(top[0].count, 1);
    }

    #[tokio::test]
    async fn test_record_increments_count_by_exactly_one() {
        let history = store();
        history.record("BTC").await;
        let before = history.top_recent(1).await[0].count;

        history.record("BTC").await;
        let after = history.top_recent(1).await[0].count;
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn test_top_recent_orders_by_recency_descending() {
        let history = store();
        history.record_at("BTC", at(0)).await;
        history.record_at("ETH", at(2)).await;
        history.record_at("BNB", at(1)).await;

        let top: Vec<String> = history
            .top_recent(3)
            .await
            .into_iter()
            .map(|e| e.symbol)
            .collect();
        assert_eq!(top, vec!["ETH", "BNB", "BTC"]);
    }

    #[tokio::test]
    async fn test_top_recent_caps_at_n() {
        let history = store();
        for i in 0..8 {
            history.record_at(&format!("SYM{}", i), at(i)).await;
        }
        assert_eq!(history.top_recent(5).await.len(), 5);
    }

    #[tokio::test]
    async fn test_capacity_eviction_keeps_most_recent() {
        let history = store();
        for i in 0..55u32 {
            history.record_at(&format!("SYM{:02}", i), at(i)).await;
        }

        let all = history.top_recent(HISTORY_CAPACITY + 10).await;
        assert_eq!(all.len(), HISTORY_CAPACITY);

        // The five oldest were dropped.
        let symbols: Vec<&str> = all.iter().map(|e| e.symbol.as_str()).collect();
        for i in 0..5 {
            assert!(!symbols.contains(&format!("SYM{:02}", i).as_str()));
        }
        assert!(symbols.contains(&"SYM54"));
    }

    #[tokio::test]
    async fn test_re_recording_rescues_an_entry_from_eviction() {
        let history = store();
        for i in 0..50u32 {
            history.record_at(&format!("SYM{:02}", i), at(i)).await;
        }
        // SYM00 is the oldest; touching it moves it to the front.
        history.record_at("SYM00", at(50)).await;
        history.record_at("NEW", at(51)).await;

        let all = history.top_recent(HISTORY_CAPACITY).await;
        let symbols: Vec<&str> = all.iter().map(|e| e.symbol.as_str()).collect();
        assert!(symbols.contains(&"SYM00"));
        // SYM01 became the oldest and was evicted instead.
        assert!(!symbols.contains(&"SYM01"));
    }

    #[tokio::test]
    async fn test_malformed_blob_resets_to_empty() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(SEARCH_HISTORY_STORAGE_KEY, "not json").await.unwrap();

        let history = SearchHistoryStore::new(kv);
        assert!(history.top_recent(5).await.is_empty());

        // Recording starts over from an empty store.
        history.record("BTC").await;
        assert_eq!(history.top_recent(5).await.len(), 1);
    }
}
