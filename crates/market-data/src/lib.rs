//! Coinwatch Market Data Crate
//!
//! This crate provides the exchange-facing data boundary for the
//! Coinwatch application.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Full exchange symbol listings with trading status
//! - 24h ticker statistics (volume, price-change%)
//! - Spot price lookups for a single trading pair
//! - Trading-pair validation probes
//!
//! # Core Types
//!
//! - [`ExchangeProvider`] - Trait implemented by exchange REST clients
//! - [`BinanceProvider`] - Binance spot API implementation
//! - [`ExchangeSymbol`] - One tradable pair from the exchange listing
//! - [`Ticker24h`] - 24h rolling-window statistics for a pair
//! - [`PriceTicker`] - Latest price for a pair

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{ExchangeSymbol, PriceTicker, Ticker24h, SYMBOL_STATUS_TRADING};

// Re-export provider types
pub use provider::binance::BinanceProvider;
pub use provider::ExchangeProvider;

// Re-export error type
pub use errors::MarketDataError;
