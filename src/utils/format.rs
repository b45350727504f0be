//! Formatting helpers for rate and market-data display.

/// Thousands-separated value with two decimal places, `N/A` when missing or
/// non-finite.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    let formatted = format!("{:.2}", v.abs());
    let (int_part, frac_part) = formatted.split_once('.').expect("two decimal places");
    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).expect("ascii digits"))
        .collect::<Vec<_>>()
        .join(",");
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Signed 24h percentage change, two decimals.
pub fn format_price_change(change: Option<f64>) -> String {
    match change {
        None => "0.00%".to_string(),
        Some(c) if c == 0.0 => "0.00%".to_string(),
        Some(c) => format!("{}{:.2}%", if c >= 0.0 { "+" } else { "" }, c),
    }
}

/// Market cap scaled to trillions/billions/millions.
pub fn format_market_cap(cap: Option<f64>) -> String {
    let Some(c) = cap else {
        return "N/A".to_string();
    };
    if c >= 1e12 {
        format!("${:.2}T", c / 1e12)
    } else if c >= 1e9 {
        format!("${:.2}B", c / 1e9)
    } else if c >= 1e6 {
        format!("${:.2}M", c / 1e6)
    } else {
        format!("${}", format_currency(Some(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Some(60231.126)), "60,231.13");
        assert_eq!(format_currency(Some(1234567.0)), "1,234,567.00");
        assert_eq!(format_currency(Some(0.24)), "0.24");
        assert_eq!(format_currency(Some(-512.3)), "-512.30");
    }

    #[test]
    fn test_format_currency_fallback() {
        assert_eq!(format_currency(None), "N/A");
        assert_eq!(format_currency(Some(f64::NAN)), "N/A");
        assert_eq!(format_currency(Some(f64::INFINITY)), "N/A");
    }

    #[test]
    fn test_format_price_change_signs() {
        assert_eq!(format_price_change(Some(2.5)), "+2.50%");
        assert_eq!(format_price_change(Some(-0.84)), "-0.84%");
        assert_eq!(format_price_change(Some(0.0)), "0.00%");
        assert_eq!(format_price_change(None), "0.00%");
    }

    #[test]
    fn test_format_market_cap_scales() {
        assert_eq!(format_market_cap(Some(1.19e12)), "$1.19T");
        assert_eq!(format_market_cap(Some(4.56e10)), "$45.60B");
        assert_eq!(format_market_cap(Some(7.89e8)), "$789.00M");
        assert_eq!(format_market_cap(Some(950_000.0)), "$950,000.00");
        assert_eq!(format_market_cap(None), "N/A");
    }
}
