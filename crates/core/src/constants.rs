//! Application-wide constants.

use std::time::Duration;

/// Fixed reference currency every tracked pair is quoted in.
pub const QUOTE_ASSET: &str = "USDT";

/// Absolute 24h price change (percent) above which an asset counts as trending.
pub const TRENDING_THRESHOLD_PERCENT: f64 = 5.0;

/// Shared time-to-live for the symbol validity cache.
pub const VALIDATION_CACHE_TTL_SECS: i64 = 60 * 60;

/// Quiet period between keystrokes before a search pass is dispatched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Maximum entries retained in the search history store.
pub const HISTORY_CAPACITY: usize = 50;

/// Per-category result caps for the ranked search list.
pub const PREFIX_MATCH_LIMIT: usize = 5;
pub const FUZZY_MATCH_LIMIT: usize = 10;
pub const HISTORY_RESULT_LIMIT: usize = 5;
pub const TRENDING_RESULT_LIMIT: usize = 5;
pub const POPULAR_RESULT_LIMIT: usize = 5;

/// Fixed score assigned to prefix matches; orders them after the exact match.
pub const PREFIX_MATCH_SCORE: f64 = 0.1;

/// Maximum normalized edit distance a fuzzy match may have.
pub const FUZZY_DISTANCE_THRESHOLD: f64 = 0.4;

/// Key-value store keys.
pub const COIN_LIST_STORAGE_KEY: &str = "coinwatch_coin_list";
pub const SEARCH_HISTORY_STORAGE_KEY: &str = "coinwatch_search_history";
pub const WATCHLIST_STORAGE_KEY: &str = "coinwatch_watchlist";
