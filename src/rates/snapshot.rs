//! Immutable rate snapshots and the normalization from provider rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assets;
use crate::rates::provider::MarketTicker;

/// Display-oriented market metadata for one tracked asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetMarketData {
    pub provider_id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<String>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<String>,
    pub last_updated: Option<String>,
    pub image: Option<String>,
}

impl AssetMarketData {
    fn from_ticker(symbol: &str, ticker: &MarketTicker) -> Self {
        Self {
            provider_id: ticker.id.clone(),
            symbol: ticker
                .symbol
                .as_deref()
                .map(str::to_ascii_uppercase)
                .unwrap_or_else(|| symbol.to_string()),
            name: ticker.name.clone().unwrap_or_else(|| symbol.to_string()),
            current_price: ticker.current_price,
            market_cap: ticker.market_cap,
            market_cap_rank: ticker.market_cap_rank,
            price_change_24h: ticker.price_change_24h,
            price_change_percentage_24h: ticker.price_change_percentage_24h,
            market_cap_change_24h: ticker.market_cap_change_24h,
            market_cap_change_percentage_24h: ticker.market_cap_change_percentage_24h,
            circulating_supply: ticker.circulating_supply,
            total_supply: ticker.total_supply,
            max_supply: ticker.max_supply,
            ath: ticker.ath,
            ath_change_percentage: ticker.ath_change_percentage,
            ath_date: ticker.ath_date.clone(),
            atl: ticker.atl,
            atl_change_percentage: ticker.atl_change_percentage,
            atl_date: ticker.atl_date.clone(),
            last_updated: ticker.last_updated.clone(),
            image: ticker.image.clone(),
        }
    }
}

/// Everything one successful fetch produced: USD rates plus extended market
/// data for each tracked AssetId, stamped with the fetch time.
///
/// A snapshot is never mutated after construction; the engine swaps whole
/// snapshots so readers always see a consistent rate set.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    rates: HashMap<String, f64>,
    market_data: HashMap<String, AssetMarketData>,
    fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Normalize a provider listing into a snapshot.
    ///
    /// Rows are matched back to a tracked AssetId through the provider-id
    /// reverse lookup; unmatched rows are skipped. The matched USDT row fans
    /// out to both network variants, each with an independent copy of the
    /// market data.
    pub fn from_tickers(tickers: &[MarketTicker]) -> Self {
        let mut rates = HashMap::new();
        let mut market_data = HashMap::new();

        for ticker in tickers {
            let Some(symbol) = assets::symbol_for_provider_id(&ticker.id) else {
                tracing::debug!("ignoring unmatched listing row: {}", ticker.id);
                continue;
            };

            let price = ticker.current_price.unwrap_or(0.0);
            let data = AssetMarketData::from_ticker(symbol, ticker);

            for variant in assets::network_variants(symbol) {
                rates.insert((*variant).to_string(), price);
                market_data.insert((*variant).to_string(), data.clone());
            }
            rates.insert(symbol.to_string(), price);
            market_data.insert(symbol.to_string(), data);
        }

        Self {
            rates,
            market_data,
            fetched_at: Utc::now(),
        }
    }

    /// USD price for an already-uppercased AssetId.
    pub fn rate(&self, symbol: &str) -> Option<f64> {
        self.rates.get(symbol).copied()
    }

    pub fn market_data(&self, symbol: &str) -> Option<&AssetMarketData> {
        self.market_data.get(symbol)
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Number of AssetIds priced in this snapshot (variants included).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
