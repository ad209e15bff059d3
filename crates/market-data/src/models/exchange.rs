//! Exchange listing models.

use serde::{Deserialize, Serialize};

/// Trading status value the exchange reports for an active pair.
pub const SYMBOL_STATUS_TRADING: &str = "TRADING";

/// One tradable pair from the exchange symbol listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSymbol {
    /// Full pair symbol (e.g., "BTCUSDT")
    pub symbol: String,

    /// Base asset ticker (e.g., "BTC")
    pub base_asset: String,

    /// Quote asset ticker (e.g., "USDT")
    pub quote_asset: String,

    /// Trading status (e.g., "TRADING", "BREAK")
    pub status: String,

    /// Whether spot trading is currently allowed for the pair
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
}

impl ExchangeSymbol {
    /// True when the pair is live for spot trading against the given quote asset.
    pub fn is_spot_tradable(&self, quote_asset: &str) -> bool {
        self.status == SYMBOL_STATUS_TRADING
            && self.quote_asset == quote_asset
            && self.is_spot_trading_allowed
    }
}
