//! Wire models for exchange REST payloads.

mod exchange;
mod ticker;

pub use exchange::{ExchangeSymbol, SYMBOL_STATUS_TRADING};
pub use ticker::{PriceTicker, Ticker24h};

pub(crate) mod serde_helpers {
    //! Binance serializes most numeric ticker fields as JSON strings.

    use serde::{Deserialize, Deserializer};

    /// Deserialize an `f64` that may arrive as either a JSON string or number.
    pub fn string_as_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrFloat {
            String(String),
            Float(f64),
        }

        match StringOrFloat::deserialize(deserializer)? {
            StringOrFloat::String(s) => s.parse::<f64>().map_err(serde::de::Error::custom),
            StringOrFloat::Float(f) => Ok(f),
        }
    }
}
