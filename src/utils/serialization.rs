use serde::{de, Deserialize, Deserializer};

/// Shapes the listing API uses for numeric fields: proper numbers for liquid
/// assets, string-encoded numbers on some rows, null for the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlexibleNumber {
    Num(f64),
    Text(String),
}

/// Deserialize an optional float tolerant of number, string, or null
/// encodings (market caps and supplies of smaller assets are frequently
/// null upstream).
pub(crate) fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FlexibleNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlexibleNumber::Num(n)) => Ok(Some(n)),
        Some(FlexibleNumber::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(FlexibleNumber::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("could not parse f64 from string: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::de_opt_f64")]
        value: Option<f64>,
    }

    #[test]
    fn test_accepts_number_string_null_and_missing() {
        let row: Row = serde_json::from_str(r#"{"value": 1.5}"#).unwrap();
        assert_eq!(row.value, Some(1.5));

        let row: Row = serde_json::from_str(r#"{"value": "2.25"}"#).unwrap();
        assert_eq!(row.value, Some(2.25));

        let row: Row = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(row.value, None);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.value, None);
    }

    #[test]
    fn test_empty_string_reads_as_missing() {
        let row: Row = serde_json::from_str(r#"{"value": "  "}"#).unwrap();
        assert_eq!(row.value, None);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(serde_json::from_str::<Row>(r#"{"value": "not a number"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"value": [1]}"#).is_err());
    }
}
