//! CLI argument parsing for the rates service.
//!
//! Uses clap for argument parsing with environment variable fallbacks.

use clap::Parser;

use crate::rates::provider::DEFAULT_API_BASE;

/// Conversion-rate service for the wallet dashboard.
///
/// Keeps a periodically refreshed cache of CoinGecko market data for the
/// tracked assets and renders the live rate table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct RatesArgs {
    /// Seconds between scheduled rate refreshes
    #[arg(
        short = 'i',
        long = "refresh-interval",
        env = "RATES_REFRESH_INTERVAL",
        default_value = "60"
    )]
    pub refresh_interval: u64,

    /// Number of table renders before exiting (0 = run until ctrl-c)
    #[arg(short = 'r', long = "rounds", env = "RATES_ROUNDS", default_value = "0")]
    pub rounds: usize,

    /// Refresh once, render the table, and exit
    #[arg(long = "once", default_value = "false")]
    pub once: bool,

    /// With --once: also print the backend rate export as JSON
    #[arg(long = "export-json", default_value = "false")]
    pub export_json: bool,

    /// Base URL of the market-data API
    #[arg(
        long = "api-base",
        env = "COINGECKO_API_BASE",
        default_value = DEFAULT_API_BASE
    )]
    pub api_base: String,
}
