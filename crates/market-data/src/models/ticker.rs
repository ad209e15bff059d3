//! Ticker models: latest price and 24h rolling-window statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::string_as_f64;

/// Latest price for a trading pair.
///
/// The exchange serializes the price as a JSON string; `Decimal`'s serde
/// implementation parses it without loss.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceTicker {
    /// Full pair symbol (e.g., "BTCUSDT")
    pub symbol: String,

    /// Latest traded price
    pub price: Decimal,
}

/// 24h rolling-window statistics for a trading pair.
///
/// Only the fields the catalog consumes are modeled; the endpoint returns
/// many more.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    /// Full pair symbol (e.g., "BTCUSDT")
    pub symbol: String,

    /// 24h traded base-asset volume
    #[serde(deserialize_with = "string_as_f64")]
    pub volume: f64,

    /// Signed 24h price change, in percent
    #[serde(deserialize_with = "string_as_f64")]
    pub price_change_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_ticker_parses_string_price() {
        let json = r#"{"symbol":"BTCUSDT","price":"43210.50"}"#;
        let parsed: PriceTicker = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, dec!(43210.50));
    }

    #[test]
    fn test_ticker_24h_parses_string_numerics() {
        let json = r#"{
            "symbol": "BNBUSDT",
            "volume": "123456.78",
            "priceChangePercent": "-7.25"
        }"#;

        let parsed: Ticker24h = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.symbol, "BNBUSDT");
        assert!((parsed.volume - 123456.78).abs() < f64::EPSILON);
        assert!((parsed.price_change_percent - (-7.25)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ticker_24h_accepts_plain_numbers() {
        let json = r#"{"symbol":"ETHUSDT","volume":10.5,"priceChangePercent":1.0}"#;
        let parsed: Ticker24h = serde_json::from_str(json).unwrap();
        assert!((parsed.volume - 10.5).abs() < f64::EPSILON);
    }
}
