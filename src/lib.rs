pub mod assets;
pub mod cli;
pub mod rates;
pub mod utils;

// Re-export the surface consumers touch day to day.
pub use rates::{
    AssetMarketData, CoinGeckoProvider, MarketDataProvider, RateSnapshot, RatesEngine, RatesError,
};
