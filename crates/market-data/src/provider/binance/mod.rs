//! Binance spot market data provider implementation.
//!
//! This module provides exchange data from the Binance public REST API:
//! - Symbol listing via /api/v3/exchangeInfo
//! - 24h statistics via /api/v3/ticker/24hr
//! - Latest price and pair validation via /api/v3/ticker/price
//!
//! The public endpoints require no API key. Weight-based rate limits
//! apply; a 429 response is surfaced as `MarketDataError::RateLimited`.
//! API documentation: https://binance-docs.github.io/apidocs/spot/en/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{ExchangeSymbol, PriceTicker, Ticker24h};
use crate::provider::ExchangeProvider;

const BASE_URL: &str = "https://api.binance.com";
const PROVIDER_ID: &str = "BINANCE";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /api/v3/exchangeInfo
#[derive(Debug, Deserialize)]
struct ExchangeInfoResponse {
    /// All listed pairs
    symbols: Vec<ExchangeSymbol>,
    // Note: timezone, serverTime and rateLimits fields exist but are not used
}

/// Error response body from Binance
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    /// Binance error code (e.g., -1121 for invalid symbol)
    code: Option<i64>,
    /// Human-readable message
    msg: Option<String>,
}

// ============================================================================
// BinanceProvider
// ============================================================================

/// Binance spot exchange provider.
///
/// All requests go to the public REST API; no credentials are needed.
pub struct BinanceProvider {
    client: Client,
    base_url: String,
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceProvider {
    /// Create a new Binance provider against the public API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Create a provider against a custom base URL (mock servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Make a GET request to the Binance API and return the raw body.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self.client.get(&url);
        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("Binance request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        // Weight-based rate limiting; 418 is Binance's auto-ban escalation
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status.as_u16() == 418
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            // Binance reports an unknown pair as 400 with code -1121
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if error_resp.code == Some(-1121) {
                    return Err(MarketDataError::SymbolNotFound(
                        error_resp.msg.unwrap_or_else(|| "Invalid symbol".to_string()),
                    ));
                }
                if let Some(msg) = error_resp.msg {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, text: &str, what: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse {} response: {}", what, e),
        })
    }
}

#[async_trait]
impl ExchangeProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn ticker_price(&self, symbol: &str) -> Result<PriceTicker, MarketDataError> {
        let params = [("symbol", symbol)];
        let text = self.fetch("/api/v3/ticker/price", &params).await?;
        self.parse(&text, "price ticker")
    }

    async fn exchange_info(&self) -> Result<Vec<ExchangeSymbol>, MarketDataError> {
        let text = self.fetch("/api/v3/exchangeInfo", &[]).await?;
        let response: ExchangeInfoResponse = self.parse(&text, "exchange info")?;
        Ok(response.symbols)
    }

    async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, MarketDataError> {
        let text = self.fetch("/api/v3/ticker/24hr", &[]).await?;
        self.parse(&text, "24h ticker")
    }

    async fn check_trading_pair(&self, symbol: &str) -> Result<(), MarketDataError> {
        // The price endpoint is the cheapest probe for pair existence.
        self.ticker_price(symbol).await.map(|_| ())
    }
}
