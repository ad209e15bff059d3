//! Exchange provider implementations.

pub mod binance;
mod traits;

pub use traits::ExchangeProvider;
