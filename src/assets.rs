//! Tracked asset table and CoinGecko identifier mapping.

/// AssetId -> CoinGecko id for every asset the wallet tracks.
///
/// The list is fixed by product, not user-configurable.
pub const TRACKED_ASSETS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("USDT", "tether"),
    ("ETH", "ethereum"),
    ("TRX", "tron"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("AVAX", "avalanche-2"),
    ("POL", "polygon-ecosystem-token"),
];

/// Network variants of tether. Distinct AssetIds that share one market price.
pub const USDT_VARIANTS: &[&str] = &["USDT_ERC20", "USDT_TRC20"];

/// Map an AssetId to CoinGecko's asset id (case-insensitive).
/// Network variants resolve to the underlying token's id.
pub fn provider_id(symbol: &str) -> Option<&'static str> {
    let sym = symbol.to_ascii_uppercase();
    let sym = if USDT_VARIANTS.contains(&sym.as_str()) {
        "USDT"
    } else {
        sym.as_str()
    };
    TRACKED_ASSETS
        .iter()
        .find(|(tracked, _)| *tracked == sym)
        .map(|(_, id)| *id)
}

/// Reverse lookup: CoinGecko id -> tracked AssetId.
pub fn symbol_for_provider_id(id: &str) -> Option<&'static str> {
    TRACKED_ASSETS
        .iter()
        .find(|(_, tracked)| *tracked == id)
        .map(|(symbol, _)| *symbol)
}

/// Variant AssetIds a base symbol fans out to. Empty for everything but USDT.
pub fn network_variants(symbol: &str) -> &'static [&'static str] {
    if symbol.eq_ignore_ascii_case("USDT") {
        USDT_VARIANTS
    } else {
        &[]
    }
}

/// Comma-joined provider ids for the upstream `ids` query parameter.
pub fn tracked_provider_ids() -> String {
    TRACKED_ASSETS
        .iter()
        .map(|(_, id)| *id)
        .collect::<Vec<_>>()
        .join(",")
}

/// Assets in wallet display order: every tracked symbol, with the USDT base
/// entry expanded into its network variants.
pub fn display_assets() -> Vec<&'static str> {
    let mut out = Vec::new();
    for (symbol, _) in TRACKED_ASSETS {
        let variants = network_variants(symbol);
        if variants.is_empty() {
            out.push(*symbol);
        } else {
            out.extend_from_slice(variants);
        }
    }
    out
}
