//! The conversion-rate engine: a shared cache of the latest market snapshot
//! with synchronous lookups and a service-owned refresh ticker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::rates::error::RatesError;
use crate::rates::provider::MarketDataProvider;
use crate::rates::snapshot::{AssetMarketData, RateSnapshot};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Owns the freshest obtainable rate snapshot and answers point and
/// cross-asset conversion queries against it.
///
/// Consumers read synchronously and never block on network I/O: lookups hit
/// the last successfully fetched snapshot, or fall back (`0.0` for rates,
/// `None` for market data) until the first fetch lands. Construct one engine
/// at the composition root and hand out clones; all clones share state.
#[derive(Clone)]
pub struct RatesEngine {
    shared: Arc<Shared>,
}

struct Shared {
    provider: Box<dyn MarketDataProvider>,
    refresh_interval: Duration,
    // Whole-snapshot replacement only. A fetch either swaps in a complete
    // new snapshot or leaves this untouched.
    snapshot: RwLock<Option<Arc<RateSnapshot>>>,
    is_loading: AtomicBool,
    last_error: Mutex<Option<RatesError>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl RatesEngine {
    pub fn new(provider: impl MarketDataProvider + 'static) -> Self {
        Self::with_interval(provider, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_interval(
        provider: impl MarketDataProvider + 'static,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                provider: Box::new(provider),
                refresh_interval,
                snapshot: RwLock::new(None),
                is_loading: AtomicBool::new(false),
                last_error: Mutex::new(None),
                ticker: Mutex::new(None),
            }),
        }
    }

    /// Fetch the tracked-asset listing once and swap in the resulting
    /// snapshot.
    ///
    /// On failure the previous snapshot is retained and `last_error` is set;
    /// the error is returned so explicit callers (a "refresh rates" action)
    /// can display it. Overlapping calls are independent requests; whichever
    /// completes last wins.
    pub async fn refresh(&self) -> Result<(), RatesError> {
        self.shared.is_loading.store(true, Ordering::SeqCst);
        let result = self.shared.provider.fetch_markets().await;

        let outcome = match result {
            Ok(tickers) => {
                let snapshot = Arc::new(RateSnapshot::from_tickers(&tickers));
                tracing::debug!("rate snapshot refreshed: {} assets priced", snapshot.len());
                *self.shared.snapshot.write().unwrap() = Some(snapshot);
                *self.shared.last_error.lock().unwrap() = None;
                Ok(())
            }
            Err(err) => {
                *self.shared.last_error.lock().unwrap() = Some(err.clone());
                Err(err)
            }
        };

        self.shared.is_loading.store(false, Ordering::SeqCst);
        outcome
    }

    /// USD price for an AssetId (case-insensitive).
    ///
    /// `"USD"` is the identity rate. Anything unpriced (no snapshot yet, or
    /// an unknown asset) reads as `0.0` so multiplicative call sites degrade
    /// to an evident "no data" instead of erroring.
    pub fn get_rate(&self, asset: &str) -> f64 {
        let sym = asset.to_ascii_uppercase();
        if sym == "USD" {
            return 1.0;
        }
        self.shared
            .snapshot
            .read()
            .unwrap()
            .as_ref()
            .and_then(|snapshot| snapshot.rate(&sym))
            .unwrap_or(0.0)
    }

    /// Extended market metadata for an AssetId, `None` on any miss.
    pub fn get_market_data(&self, asset: &str) -> Option<AssetMarketData> {
        let sym = asset.to_ascii_uppercase();
        self.shared
            .snapshot
            .read()
            .unwrap()
            .as_ref()
            .and_then(|snapshot| snapshot.market_data(&sym).cloned())
    }

    /// Convert `amount` of `from` into `to` using the current snapshot.
    ///
    /// Conversions through an unpriced asset return `0.0`; the division is
    /// guarded so no `Inf`/`NaN` can reach a balance display. Pure
    /// computation, never triggers a fetch.
    pub fn convert_amount(&self, amount: f64, from: &str, to: &str) -> f64 {
        if to.eq_ignore_ascii_case("USD") {
            return amount * self.get_rate(from);
        }

        let from_rate = self.get_rate(from);
        let to_rate = self.get_rate(to);
        if from_rate == 0.0 || to_rate == 0.0 {
            return 0.0;
        }
        amount * from_rate / to_rate
    }

    /// Whether a refresh is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.shared.is_loading.load(Ordering::SeqCst)
    }

    /// The most recent refresh failure, cleared by the next success.
    pub fn last_error(&self) -> Option<RatesError> {
        self.shared.last_error.lock().unwrap().clone()
    }

    /// When the current snapshot was fetched, `None` before the first
    /// success.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.shared
            .snapshot
            .read()
            .unwrap()
            .as_ref()
            .map(|snapshot| snapshot.fetched_at())
    }

    /// The current snapshot, if any. Handy for rendering a whole table in
    /// one consistent view.
    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.shared.snapshot.read().unwrap().clone()
    }

    /// Spawn the background ticker: an immediate refresh, then one per
    /// `refresh_interval`. Tick failures are logged, never propagated.
    /// Starting again replaces any previous ticker. Must be called from
    /// within a tokio runtime.
    pub fn start(&self) {
        let weak = Arc::downgrade(&self.shared);
        let interval = self.shared.refresh_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let Some(engine) = Self::upgrade(&weak) else {
                    break;
                };
                if let Err(err) = engine.refresh().await {
                    tracing::warn!("scheduled rate refresh failed: {err}");
                }
            }
        });

        if let Some(previous) = self.shared.ticker.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the background ticker. Lookups keep serving the last snapshot.
    pub fn stop(&self) {
        if let Some(handle) = self.shared.ticker.lock().unwrap().take() {
            handle.abort();
        }
    }

    // The ticker holds only a weak reference so dropping the last engine
    // handle tears the task down instead of keeping the state alive forever.
    fn upgrade(weak: &Weak<Shared>) -> Option<RatesEngine> {
        weak.upgrade().map(|shared| RatesEngine { shared })
    }
}
