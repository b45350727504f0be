//! Market-data provider seam and the CoinGecko implementation.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::assets;
use crate::rates::error::RatesError;
use crate::utils::serialization::de_opt_f64;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One row of CoinGecko's `/coins/markets` listing.
///
/// Everything beyond `id` can be absent for thinly traded assets, and numeric
/// fields occasionally arrive string-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketTicker {
    pub id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub max_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ath: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub atl: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<String>,
    pub last_updated: Option<String>,
    pub image: Option<String>,
}

/// Abstract interface for fetching the tracked-asset market listing.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch current market data for every tracked asset in one call.
    async fn fetch_markets(&self) -> Result<Vec<MarketTicker>, RatesError>;
}

/// CoinGecko-backed provider. One GET per call to `/coins/markets`, quoted in
/// USD, restricted to the tracked provider ids. No authentication required.
#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    client: Client,
    markets_url: Url,
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_API_BASE).expect("default API base is a valid URL")
    }

    /// Build a provider against an alternate base URL (e.g. a pro-tier or
    /// proxy endpoint).
    pub fn with_base(base: &str) -> anyhow::Result<Self> {
        let markets_url = Url::parse(&format!("{}/coins/markets", base.trim_end_matches('/')))
            .with_context(|| format!("invalid API base URL: {base}"))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client with static configuration");
        Ok(Self {
            client,
            markets_url,
        })
    }

    /// The fully parameterized markets request URL.
    fn markets_query_url(&self) -> Url {
        let mut url = self.markets_url.clone();
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("order", "market_cap_desc")
            .append_pair("per_page", "100")
            .append_pair("page", "1")
            .append_pair("sparkline", "false")
            .append_pair("price_change_percentage", "24h")
            .append_pair("ids", &assets::tracked_provider_ids());
        url
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_markets(&self) -> Result<Vec<MarketTicker>, RatesError> {
        let url = self.markets_query_url();
        tracing::debug!("fetching market data: {url}");

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| RatesError::Fetch(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| RatesError::Fetch(format!("non-success status: {e}")))?;

        let body = resp
            .bytes()
            .await
            .map_err(|e| RatesError::Fetch(format!("reading body failed: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| RatesError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markets_query_url() {
        let provider = CoinGeckoProvider::new();
        let url = provider.markets_query_url().to_string();
        assert!(url.starts_with("https://api.coingecko.com/api/v3/coins/markets?"));
        assert!(url.contains("vs_currency=usd"));
        assert!(url.contains("order=market_cap_desc"));
        assert!(url.contains("price_change_percentage=24h"));
        assert!(url.contains("bitcoin"));
        assert!(url.contains("polygon-ecosystem-token"));
    }

    #[test]
    fn test_with_base_trims_trailing_slash() {
        let provider = CoinGeckoProvider::with_base("http://localhost:8001/api/v3/").unwrap();
        assert_eq!(
            provider.markets_url.as_str(),
            "http://localhost:8001/api/v3/coins/markets"
        );
    }

    #[test]
    fn test_with_base_rejects_garbage() {
        assert!(CoinGeckoProvider::with_base("not a url").is_err());
    }

    #[test]
    fn test_ticker_parses_full_row() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 60231.12,
            "market_cap": 1190000000000,
            "market_cap_rank": 1,
            "price_change_24h": -512.3,
            "price_change_percentage_24h": -0.84,
            "market_cap_change_24h": -10000000000,
            "market_cap_change_percentage_24h": -0.83,
            "circulating_supply": 19700000.0,
            "total_supply": 21000000.0,
            "max_supply": 21000000.0,
            "ath": 73738,
            "ath_change_percentage": -18.3,
            "ath_date": "2024-03-14T07:10:36.635Z",
            "atl": 67.81,
            "atl_change_percentage": 88700.1,
            "atl_date": "2013-07-06T00:00:00.000Z",
            "last_updated": "2024-12-01T12:00:00.000Z"
        }"#;
        let ticker: MarketTicker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.id, "bitcoin");
        assert_eq!(ticker.current_price, Some(60231.12));
        assert_eq!(ticker.market_cap_rank, Some(1));
        assert_eq!(ticker.max_supply, Some(21000000.0));
    }

    #[test]
    fn test_ticker_tolerates_nulls_and_missing_fields() {
        let json = r#"{"id": "tron", "symbol": "trx", "name": "TRON",
            "current_price": "0.24", "market_cap": null, "max_supply": null}"#;
        let ticker: MarketTicker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.current_price, Some(0.24));
        assert_eq!(ticker.market_cap, None);
        assert_eq!(ticker.ath, None);
        assert_eq!(ticker.image, None);
    }

    #[test]
    fn test_listing_must_be_an_array() {
        let err = serde_json::from_str::<Vec<MarketTicker>>(r#"{"status": "error"}"#);
        assert!(err.is_err());
    }
}
