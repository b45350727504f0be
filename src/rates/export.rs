//! Backend-facing flat export of the current rates.
//!
//! The wallet backend stores one rate column per asset, keyed with lowercase
//! underscore names. Tether variants are assumed pegged when unpriced; every
//! other asset exports its zero-fallback as-is.

use std::collections::BTreeMap;

use crate::rates::engine::RatesEngine;

/// AssetId -> backend column name.
pub const EXPORT_KEYS: &[(&str, &str)] = &[
    ("BTC", "btc"),
    ("USDT_ERC20", "usdt_erc20"),
    ("USDT_TRC20", "usdt_trc20"),
    ("ETH", "eth"),
    ("TRX", "trx"),
    ("SOL", "sol"),
    ("XRP", "xrp"),
    ("AVAX", "avax"),
    ("POL", "pol"),
];

/// Current rates in the backend's shape.
pub fn export_rates(engine: &RatesEngine) -> BTreeMap<&'static str, f64> {
    EXPORT_KEYS
        .iter()
        .map(|(asset, key)| {
            let rate = engine.get_rate(asset);
            let rate = match *asset {
                // Stable peg assumption for tether variants.
                "USDT_ERC20" | "USDT_TRC20" if rate == 0.0 => 1.0,
                _ => rate,
            };
            (*key, rate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::rates::error::RatesError;
    use crate::rates::provider::{MarketDataProvider, MarketTicker};

    struct StaticProvider(Vec<MarketTicker>);

    #[async_trait]
    impl MarketDataProvider for StaticProvider {
        async fn fetch_markets(&self) -> Result<Vec<MarketTicker>, RatesError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_export_before_first_fetch_pegs_only_tether() {
        let engine = RatesEngine::new(StaticProvider(vec![]));
        let rates = export_rates(&engine);
        assert_eq!(rates["btc"], 0.0);
        assert_eq!(rates["usdt_erc20"], 1.0);
        assert_eq!(rates["usdt_trc20"], 1.0);
    }

    #[tokio::test]
    async fn test_export_uses_fetched_rates() {
        let btc: MarketTicker = serde_json::from_value(serde_json::json!({
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 61000.0,
        }))
        .unwrap();
        let usdt: MarketTicker = serde_json::from_value(serde_json::json!({
            "id": "tether", "symbol": "usdt", "name": "Tether", "current_price": 0.999,
        }))
        .unwrap();

        let engine = RatesEngine::new(StaticProvider(vec![btc, usdt]));
        engine.refresh().await.unwrap();

        let rates = export_rates(&engine);
        assert_eq!(rates["btc"], 61000.0);
        assert_eq!(rates["usdt_erc20"], 0.999);
        assert_eq!(rates["usdt_trc20"], 0.999);
        assert_eq!(rates["sol"], 0.0);
        assert_eq!(rates.len(), EXPORT_KEYS.len());
    }
}
