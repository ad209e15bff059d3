//! Tests for SearchController and SymbolCatalog contracts.
//!
//! These tests verify the debounced input loop, the blended empty-query
//! fallback, the selection flow, and catalog refresh edge cases.
//!
//! # Critical Contract Points
//!
//! 1. Debounce: only the last keystroke of a burst publishes results
//! 2. Fallback blend: history > trending > popular, first occurrence wins
//! 3. Selection: history is recorded and the caller notified even when
//!    validation fails (the failure is a warning, not a veto)
//! 4. Refresh: failures keep the previous snapshot and prime nothing

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use coinwatch_market_data::{
        ExchangeProvider, ExchangeSymbol, MarketDataError, PriceTicker, Ticker24h,
    };

    use crate::catalog::SymbolCatalog;
    use crate::history::SearchHistoryStore;
    use crate::search::{MatchEngine, MatchType, SearchConfig, SearchController};
    use crate::storage::MemoryKeyValueStore;
    use crate::validation::ValidityCache;

    // =========================================================================
    // Mock ExchangeProvider
    // =========================================================================

    /// Exchange stub serving a fixed listing of (base, volume, change%).
    struct MockExchange {
        listing: Vec<(String, f64, f64)>,
        valid_pairs: Mutex<HashSet<String>>,
        fail_all: AtomicBool,
        probe_calls: AtomicUsize,
    }

    impl MockExchange {
        fn new(listing: &[(&str, f64, f64)]) -> Self {
            let valid_pairs = listing
                .iter()
                .map(|(base, _, _)| format!("{}USDT", base))
                .collect();
            Self {
                listing: listing
                    .iter()
                    .map(|(base, vol, chg)| (base.to_string(), *vol, *chg))
                    .collect(),
                valid_pairs: Mutex::new(valid_pairs),
                fail_all: AtomicBool::new(false),
                probe_calls: AtomicUsize::new(0),
            }
        }

        fn set_fail_all(&self, fail: bool) {
            self.fail_all.store(fail, Ordering::SeqCst);
        }

        fn probes(&self) -> usize {
            self.probe_calls.load(Ordering::SeqCst)
        }

        fn check_down(&self) -> Result<(), MarketDataError> {
            if self.fail_all.load(Ordering::SeqCst) {
                Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "exchange down".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ExchangeProvider for MockExchange {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn ticker_price(&self, symbol: &str) -> Result<PriceTicker, MarketDataError> {
            self.check_down()?;
            if self.valid_pairs.lock().unwrap().contains(symbol) {
                Ok(PriceTicker {
                    symbol: symbol.to_string(),
                    price: dec!(100.0),
                })
            } else {
                Err(MarketDataError::SymbolNotFound(symbol.to_string()))
            }
        }

        async fn exchange_info(&self) -> Result<Vec<ExchangeSymbol>, MarketDataError> {
            self.check_down()?;
            Ok(self
                .listing
                .iter()
                .map(|(base, _, _)| ExchangeSymbol {
                    symbol: format!("{}USDT", base),
                    base_asset: base.clone(),
                    quote_asset: "USDT".to_string(),
                    status: "TRADING".to_string(),
                    is_spot_trading_allowed: true,
                })
                .collect())
        }

        async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, MarketDataError> {
            self.check_down()?;
            Ok(self
                .listing
                .iter()
                .map(|(base, volume, change)| Ticker24h {
                    symbol: format!("{}USDT", base),
                    volume: *volume,
                    price_change_percent: *change,
                })
                .collect())
        }

        async fn check_trading_pair(&self, symbol: &str) -> Result<(), MarketDataError> {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            self.check_down()?;
            if self.valid_pairs.lock().unwrap().contains(symbol) {
                Ok(())
            } else {
                Err(MarketDataError::SymbolNotFound(symbol.to_string()))
            }
        }
    }

    // =========================================================================
    // Fixture
    // =========================================================================

    struct Fixture {
        exchange: Arc<MockExchange>,
        catalog: Arc<SymbolCatalog>,
        history: Arc<SearchHistoryStore>,
        validity: Arc<ValidityCache>,
    }

    /// Catalog with a mild gainer (BTC, vol 1000, +6%), a flat volume
    /// leader (ETH, vol 5000, +1%), and a steep loser (BNB, vol 200, -7%).
    fn scenario_listing() -> Vec<(&'static str, f64, f64)> {
        vec![("BTC", 1000.0, 6.0), ("ETH", 5000.0, 1.0), ("BNB", 200.0, -7.0)]
    }

    async fn fixture(listing: &[(&str, f64, f64)]) -> Fixture {
        let exchange = Arc::new(MockExchange::new(listing));
        let store = Arc::new(MemoryKeyValueStore::new());
        let validity = Arc::new(ValidityCache::new(exchange.clone()));
        let catalog = Arc::new(SymbolCatalog::new(
            exchange.clone(),
            store.clone(),
            validity.clone(),
        ));
        catalog.refresh().await;
        let history = Arc::new(SearchHistoryStore::new(store));
        Fixture {
            exchange,
            catalog,
            history,
            validity,
        }
    }

    fn controller(fixture: &Fixture, config: SearchConfig) -> Arc<SearchController> {
        Arc::new(SearchController::new(
            fixture.catalog.clone(),
            fixture.history.clone(),
            fixture.validity.clone(),
            MatchEngine::default(),
            config,
        ))
    }

    // =========================================================================
    // Empty-query fallback
    // =========================================================================

    #[tokio::test]
    async fn test_fallback_blend_with_empty_history() {
        let fixture = fixture(&scenario_listing()).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_focus().await;
        let results = controller.results();

        // Trending by |change| desc: BNB (7) before BTC (6); popular adds
        // ETH; BNB and BTC keep their trending labels (first occurrence).
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].symbol, "BNB");
        assert_eq!(results[0].match_type, MatchType::Trending);
        assert_eq!(results[1].symbol, "BTC");
        assert_eq!(results[1].match_type, MatchType::Trending);
        assert_eq!(results[2].symbol, "ETH");
        assert_eq!(results[2].match_type, MatchType::Popular);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[tokio::test]
    async fn test_fallback_history_takes_precedence_over_other_labels() {
        let fixture = fixture(&scenario_listing()).await;
        fixture.history.record("BNB").await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_focus().await;
        let results = controller.results();

        assert_eq!(results[0].symbol, "BNB");
        assert_eq!(results[0].match_type, MatchType::History);
        // BNB appears exactly once despite also being trending and popular.
        let bnb_count = results.iter().filter(|r| r.symbol == "BNB").count();
        assert_eq!(bnb_count, 1);
    }

    #[tokio::test]
    async fn test_fallback_drops_history_entries_missing_from_catalog() {
        let fixture = fixture(&scenario_listing()).await;
        fixture.history.record("DELISTED").await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_focus().await;
        assert!(!controller
            .results()
            .iter()
            .any(|r| r.symbol == "DELISTED"));
    }

    #[tokio::test]
    async fn test_fallback_respects_category_caps() {
        let listing: Vec<(String, f64, f64)> = (0..12)
            .map(|i| (format!("SYM{:02}", i), 1000.0 - i as f64, 10.0 + i as f64))
            .collect();
        let refs: Vec<(&str, f64, f64)> =
            listing.iter().map(|(s, v, c)| (s.as_str(), *v, *c)).collect();
        let fixture = fixture(&refs).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_focus().await;
        let results = controller.results();
        let count = |t: MatchType| results.iter().filter(|r| r.match_type == t).count();

        assert!(count(MatchType::Trending) <= 5);
        assert!(count(MatchType::Popular) <= 5);
    }

    // =========================================================================
    // Debounced query dispatch
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_of_burst_publishes() {
        let fixture = fixture(&scenario_listing()).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_query_change("E");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.on_query_change("ET");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.on_query_change("ETH");

        // Let the final quiet period elapse and the pass publish.
        tokio::time::sleep(Duration::from_millis(500)).await;

        let results = controller.results();
        assert_eq!(results[0].symbol, "ETH");
        assert_eq!(results[0].match_type, MatchType::Exact);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_inside_quiet_period_restarts_the_window() {
        let fixture = fixture(&scenario_listing()).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_query_change("BT");
        // 200ms < debounce; nothing may have published yet.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(controller.results().is_empty());

        controller.on_query_change("BTC");
        tokio::time::sleep(Duration::from_millis(500)).await;

        // The superseded "BT" pass never ran; only "BTC" published.
        let results = controller.results();
        assert_eq!(results[0].symbol, "BTC");
        assert_eq!(results[0].match_type, MatchType::Exact);
    }

    #[tokio::test]
    async fn test_discarded_pass_resets_loading_and_keeps_results() {
        let fixture = fixture(&scenario_listing()).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_focus().await;
        let published: Vec<String> = controller
            .results()
            .into_iter()
            .map(|r| r.symbol)
            .collect();

        // A pass dispatched under an outdated generation computes, then
        // discards instead of publishing. It must lower the loading flag
        // it raised and leave the published results alone.
        controller.run_search_pass(0, "BTC").await;

        assert!(!controller.is_loading());
        let current: Vec<String> = controller
            .results()
            .into_iter()
            .map(|r| r.symbol)
            .collect();
        assert_eq!(current, published);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_clears_after_publish() {
        let fixture = fixture(&scenario_listing()).await;
        let controller = controller(&fixture, SearchConfig::default());

        controller.on_query_change("BTC");
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(!controller.is_loading());
        assert!(!controller.results().is_empty());
    }

    // =========================================================================
    // Selection flow
    // =========================================================================

    #[tokio::test]
    async fn test_select_records_history_and_notifies_caller() {
        let fixture = fixture(&scenario_listing()).await;
        let notified = Arc::new(AtomicBool::new(false));
        let flag = notified.clone();
        let controller = Arc::new(
            SearchController::new(
                fixture.catalog.clone(),
                fixture.history.clone(),
                fixture.validity.clone(),
                MatchEngine::default(),
                SearchConfig::default(),
            )
            .with_on_select(Box::new(move |_| flag.store(true, Ordering::SeqCst))),
        );

        let selection = controller.select("BTC").await;

        assert_eq!(selection.symbol, "BTC");
        assert_eq!(selection.validated, None);
        assert!(notified.load(Ordering::SeqCst));
        assert_eq!(fixture.history.top_recent(1).await[0].symbol, "BTC");
    }

    #[tokio::test]
    async fn test_invalid_selection_warns_but_still_goes_through() {
        let fixture = fixture(&scenario_listing()).await;
        let config = SearchConfig {
            validate_on_select: true,
            ..SearchConfig::default()
        };
        let controller = controller(&fixture, config);

        let selection = controller.select("XYZ").await;

        assert_eq!(selection.validated, Some(false));
        assert!(controller.validation_failed("XYZ"));
        // The warning is non-blocking: history still records the pick.
        assert_eq!(fixture.history.top_recent(1).await[0].symbol, "XYZ");
    }

    #[tokio::test]
    async fn test_valid_selection_uses_primed_cache_without_probing() {
        let fixture = fixture(&scenario_listing()).await;
        let config = SearchConfig {
            validate_on_select: true,
            ..SearchConfig::default()
        };
        let controller = controller(&fixture, config);

        // Catalog refresh primed BTC as valid; no probe is needed.
        let selection = controller.select("BTC").await;

        assert_eq!(selection.validated, Some(true));
        assert!(!controller.validation_failed("BTC"));
        assert_eq!(fixture.exchange.probes(), 0);
    }

    // =========================================================================
    // Catalog refresh
    // =========================================================================

    #[tokio::test]
    async fn test_refresh_builds_one_asset_per_spot_pair() {
        let fixture = fixture(&scenario_listing()).await;
        let snapshot = fixture.catalog.snapshot();

        assert_eq!(snapshot.len(), 3);
        let btc = snapshot.iter().find(|a| a.symbol == "BTC").unwrap();
        assert_eq!(btc.quote_asset, "USDT");
        assert!(btc.is_trending);
        let eth = snapshot.iter().find(|a| a.symbol == "ETH").unwrap();
        assert!(!eth.is_trending);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_snapshot() {
        let fixture = fixture(&scenario_listing()).await;
        assert_eq!(fixture.catalog.snapshot().len(), 3);

        fixture.exchange.set_fail_all(true);
        let refreshed = fixture.catalog.refresh().await;

        assert!(refreshed.is_empty());
        assert_eq!(fixture.catalog.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_load_cached_restores_persisted_snapshot() {
        let exchange = Arc::new(MockExchange::new(&scenario_listing()));
        let store = Arc::new(MemoryKeyValueStore::new());
        let validity = Arc::new(ValidityCache::new(exchange.clone()));

        // First catalog refreshes and persists.
        let first = SymbolCatalog::new(exchange.clone(), store.clone(), validity.clone());
        first.refresh().await;

        // Second catalog starts cold and restores from the store.
        let second = SymbolCatalog::new(exchange, store, validity);
        assert!(second.snapshot().is_empty());
        second.load_cached().await;
        assert_eq!(second.snapshot().len(), 3);
    }
}
