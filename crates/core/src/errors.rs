//! Core error types for the Coinwatch application.
//!
//! This module defines storage-agnostic error types. Failures of the
//! external exchange boundary arrive as [`MarketDataError`] and are
//! wrapped here; persistence failures are carried in string form so the
//! core stays independent of any concrete store.

use thiserror::Error;

use coinwatch_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the watchlist application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// User-input rejections surfaced to the caller.
///
/// These are never retried automatically; the embedding UI decides how
/// to present them.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Symbol '{0}' was not found on the exchange")]
    SymbolNotFound(String),

    #[error("Symbol '{0}' is already tracked")]
    DuplicateSymbol(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
