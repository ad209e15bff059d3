//! Debounced search controller.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};

use super::match_engine::MatchEngine;
use super::search_model::{MatchType, SearchResult};
use crate::catalog::{Asset, SymbolCatalog};
use crate::constants::{
    HISTORY_RESULT_LIMIT, POPULAR_RESULT_LIMIT, SEARCH_DEBOUNCE, TRENDING_RESULT_LIMIT,
};
use crate::history::SearchHistoryStore;
use crate::validation::ValidityCache;

/// Caller-supplied callback invoked after a selection is recorded.
pub type SelectCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Controller tuning knobs.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Run a validity check on every selection.
    pub validate_on_select: bool,

    /// Quiet period before a keystroke burst dispatches a search pass.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            validate_on_select: false,
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// Outcome of a selection, surfaced to the embedding UI.
#[derive(Clone, Debug)]
pub struct Selection {
    pub symbol: String,

    /// `Some(false)` is a non-blocking warning: the symbol failed
    /// validation but the selection went through anyway. `None` when
    /// validation was not requested.
    pub validated: Option<bool>,
}

struct ControllerState {
    results: Vec<SearchResult>,
    loading: bool,
    validation_failed: HashMap<String, bool>,
}

/// Bridges user input events to the match engine and caches.
///
/// Keystrokes are debounced: every call to
/// [`on_query_change`](Self::on_query_change) bumps a generation counter
/// and schedules a pass after the quiet period; a pass publishes its
/// results only while its generation is still the latest, so superseded
/// passes complete and are discarded rather than awaited.
pub struct SearchController {
    catalog: Arc<SymbolCatalog>,
    history: Arc<SearchHistoryStore>,
    validity: Arc<ValidityCache>,
    engine: MatchEngine,
    config: SearchConfig,
    generation: AtomicU64,
    state: Mutex<ControllerState>,
    on_select: Option<SelectCallback>,
}

impl SearchController {
    pub fn new(
        catalog: Arc<SymbolCatalog>,
        history: Arc<SearchHistoryStore>,
        validity: Arc<ValidityCache>,
        engine: MatchEngine,
        config: SearchConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            validity,
            engine,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(ControllerState {
                results: Vec::new(),
                loading: false,
                validation_failed: HashMap::new(),
            }),
            on_select: None,
        }
    }

    /// Registers the callback invoked after every recorded selection.
    pub fn with_on_select(mut self, callback: SelectCallback) -> Self {
        self.on_select = Some(callback);
        self
    }

    /// Handles one keystroke. Restarts the debounce window; only the last
    /// keystroke of a burst dispatches a search pass.
    pub fn on_query_change(self: &Arc<Self>, text: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = text.to_string();
        let controller = Arc::clone(self);

        tokio::spawn(async move {
            tokio::time::sleep(controller.config.debounce).await;
            if controller.generation.load(Ordering::SeqCst) != generation {
                // A newer keystroke restarted the window.
                return;
            }
            controller.run_search_pass(generation, &query).await;
        });
    }

    /// Handles input focus: shows the blended fallback list immediately.
    pub async fn on_focus(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.run_search_pass(generation, "").await;
    }

    /// Records a selection and notifies the caller.
    ///
    /// When configured to validate, an invalid symbol is flagged but the
    /// selection still proceeds; the UI decides what to do with the
    /// warning. History is always recorded before the callback fires.
    pub async fn select(&self, symbol: &str) -> Selection {
        let validated = if self.config.validate_on_select {
            let valid = self.validity.is_valid(symbol).await;
            if !valid {
                warn!("Selected symbol failed validation: {}", symbol);
            }
            self.state
                .lock()
                .unwrap()
                .validation_failed
                .insert(symbol.to_string(), !valid);
            Some(valid)
        } else {
            None
        };

        self.history.record(symbol).await;

        if let Some(callback) = &self.on_select {
            callback(symbol);
        }

        Selection {
            symbol: symbol.to_string(),
            validated,
        }
    }

    /// Current ranked results.
    pub fn results(&self) -> Vec<SearchResult> {
        self.state.lock().unwrap().results.clone()
    }

    /// True while a dispatched pass has not yet published.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// True when the last validation of `symbol` failed.
    pub fn validation_failed(&self, symbol: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .validation_failed
            .get(symbol)
            .copied()
            .unwrap_or(false)
    }

    pub(crate) async fn run_search_pass(&self, generation: u64, query: &str) {
        self.state.lock().unwrap().loading = true;

        let catalog = self.catalog.snapshot();
        let results = if query.trim().is_empty() {
            self.fallback_results(&catalog).await
        } else {
            self.engine.matches(query, &catalog)
        };

        // Publish only while still the latest pass; a stale pass must not
        // overwrite newer results.
        if self.generation.load(Ordering::SeqCst) == generation {
            let mut state = self.state.lock().unwrap();
            state.results = results;
            state.loading = false;
        } else {
            debug!("Discarding stale search pass (generation {})", generation);
            // The discarded pass still owns the flag it raised; the newer
            // pass raises it again when it runs.
            self.state.lock().unwrap().loading = false;
        }
    }

    /// Blended list shown for an empty query: recent picks, trending
    /// movers, then volume leaders, de-duplicated first-occurrence-wins so
    /// a history entry keeps its label over trending/popular.
    async fn fallback_results(&self, catalog: &[Asset]) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = Vec::new();

        for entry in self.history.top_recent(HISTORY_RESULT_LIMIT).await {
            if catalog.iter().any(|a| a.symbol == entry.symbol) {
                results.push(SearchResult::new(&entry.symbol, 0.0, MatchType::History));
            }
        }

        let mut trending: Vec<&Asset> = catalog.iter().filter(|a| a.is_trending).collect();
        trending.sort_by(|a, b| {
            b.price_change_percent
                .abs()
                .partial_cmp(&a.price_change_percent.abs())
                .unwrap_or(CmpOrdering::Equal)
        });
        for asset in trending.into_iter().take(TRENDING_RESULT_LIMIT) {
            results.push(SearchResult::new(&asset.symbol, 0.0, MatchType::Trending));
        }

        let mut popular: Vec<&Asset> = catalog.iter().collect();
        popular.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(CmpOrdering::Equal));
        for asset in popular.into_iter().take(POPULAR_RESULT_LIMIT) {
            results.push(SearchResult::new(&asset.symbol, 0.0, MatchType::Popular));
        }

        let mut seen: HashSet<String> = HashSet::new();
        results.retain(|r| seen.insert(r.symbol.clone()));
        results
    }
}
