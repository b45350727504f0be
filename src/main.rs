use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use wallet_rates::assets;
use wallet_rates::cli::RatesArgs;
use wallet_rates::rates::export;
use wallet_rates::utils::format::{format_currency, format_market_cap, format_price_change};
use wallet_rates::utils::logging::init_logging;
use wallet_rates::{CoinGeckoProvider, RatesEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = RatesArgs::parse();
    let provider = CoinGeckoProvider::with_base(&args.api_base)?;
    let interval = Duration::from_secs(args.refresh_interval);
    let engine = RatesEngine::with_interval(provider, interval);

    if args.once {
        engine
            .refresh()
            .await
            .context("failed to refresh rates")?;
        print_rate_table(&engine);
        if args.export_json {
            let payload = serde_json::to_string_pretty(&export::export_rates(&engine))
                .context("failed to serialize rate export")?;
            println!("{payload}");
        }
        return Ok(());
    }

    engine.start();
    tracing::info!(
        "rates engine started, refreshing every {}s",
        args.refresh_interval
    );

    tokio::select! {
        _ = display_loop(&engine, args.rounds, interval) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    engine.stop();
    Ok(())
}

async fn display_loop(engine: &RatesEngine, rounds: usize, interval: Duration) {
    let mut completed = 0usize;
    loop {
        // Short first wait so the initial fetch has landed by the first render.
        let wait = if completed == 0 {
            Duration::from_secs(2)
        } else {
            interval
        };
        tokio::time::sleep(wait).await;

        print_rate_table(engine);

        completed += 1;
        if rounds != 0 && completed >= rounds {
            break;
        }
    }
}

fn print_rate_table(engine: &RatesEngine) {
    let Some(snapshot) = engine.snapshot() else {
        match engine.last_error() {
            Some(err) => println!("rates unavailable: {err}"),
            None => println!("rates not loaded yet"),
        }
        return;
    };

    println!("┌────────────┬────────────────┬──────────┬────────────┐");
    println!("│   Asset    │   Price (USD)  │   24h    │ Market Cap │");
    println!("├────────────┼────────────────┼──────────┼────────────┤");

    for asset in assets::display_assets() {
        let data = snapshot.market_data(asset);
        println!(
            "│ {:>10} │ {:>14} │ {:>8} │ {:>10} │",
            asset,
            format_currency(data.and_then(|d| d.current_price)),
            format_price_change(data.and_then(|d| d.price_change_percentage_24h)),
            format_market_cap(data.and_then(|d| d.market_cap)),
        );
    }

    println!("└────────────┴────────────────┴──────────┴────────────┘");
    println!(
        "  updated {}",
        snapshot.fetched_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
}
