//! Conversion-rate engine: a periodically refreshed cache of market data
//! with synchronous lookup and cross-asset conversion.

pub mod engine;
pub mod error;
pub mod export;
pub mod provider;
pub mod snapshot;

pub use engine::{RatesEngine, DEFAULT_REFRESH_INTERVAL};
pub use error::RatesError;
pub use provider::{CoinGeckoProvider, MarketDataProvider, MarketTicker};
pub use snapshot::{AssetMarketData, RateSnapshot};
