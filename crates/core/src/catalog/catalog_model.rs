//! Catalog domain models.

use serde::{Deserialize, Serialize};

use crate::constants::TRENDING_THRESHOLD_PERCENT;

/// One tradable base asset in the catalog snapshot.
///
/// Snapshots are immutable: a refresh replaces the whole catalog, never
/// individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Uppercase base-asset ticker (e.g., "BTC")
    pub symbol: String,

    /// Quote asset the pair trades against (e.g., "USDT")
    pub quote_asset: String,

    /// 24h traded volume, non-negative
    pub volume: f64,

    /// Signed 24h price change, in percent
    pub price_change_percent: f64,

    /// Derived: absolute price change exceeds the trending threshold
    pub is_trending: bool,
}

impl Asset {
    /// Builds an asset, deriving the trending flag from the price change.
    pub fn new(
        symbol: impl Into<String>,
        quote_asset: impl Into<String>,
        volume: f64,
        price_change_percent: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            quote_asset: quote_asset.into(),
            volume,
            price_change_percent,
            is_trending: price_change_percent.abs() > TRENDING_THRESHOLD_PERCENT,
        }
    }
}
