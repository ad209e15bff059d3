//! Exchange provider trait definitions.
//!
//! This module defines the core `ExchangeProvider` trait that all
//! exchange REST clients must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{ExchangeSymbol, PriceTicker, Ticker24h};

/// Trait for exchange data providers.
///
/// Implement this trait to add support for a new exchange. The search
/// subsystem only depends on this trait, so tests can substitute an
/// in-memory implementation.
#[async_trait]
pub trait ExchangeProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "BINANCE". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest price for one trading pair.
    ///
    /// `symbol` is the full pair symbol (e.g., "BTCUSDT"). Returns
    /// `SymbolNotFound` when the exchange does not know the pair.
    async fn ticker_price(&self, symbol: &str) -> Result<PriceTicker, MarketDataError>;

    /// Fetch the full exchange symbol listing.
    ///
    /// Returns every pair the exchange lists, including halted and
    /// non-spot pairs; filtering is the caller's concern.
    async fn exchange_info(&self) -> Result<Vec<ExchangeSymbol>, MarketDataError>;

    /// Fetch 24h rolling-window statistics for every pair.
    async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, MarketDataError>;

    /// Probe whether a trading pair currently exists on the exchange.
    ///
    /// Returns `Ok(())` for a known pair, an error otherwise. Any error,
    /// network or exchange-side, means the pair cannot be confirmed.
    async fn check_trading_pair(&self, symbol: &str) -> Result<(), MarketDataError>;
}
