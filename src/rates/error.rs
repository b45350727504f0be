use thiserror::Error;

/// Failures surfaced by an explicit refresh.
///
/// Passive lookups (`get_rate`, `convert_amount`, `get_market_data`) never
/// error; they degrade to their documented fallbacks instead. Both variants
/// receive identical treatment on the background path: logged, previous
/// snapshot retained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatesError {
    /// Network failure, timeout, or a non-success HTTP status upstream.
    #[error("market data request failed: {0}")]
    Fetch(String),

    /// Response body decoded, but not into the expected shape.
    #[error("malformed market data response: {0}")]
    MalformedResponse(String),
}
