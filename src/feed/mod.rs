//! Quote feed: loads quotes from a JSON file or stdin.
//!
//! Accepts either a bare array of quotes or the screener response envelope
//! (`{"stocks": [...]}`). Fields other than the quote's own are ignored.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::models::Quote;

/// Path that selects stdin.
pub const STDIN_PATH: &str = "-";

#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteFeed {
    List(Vec<Quote>),
    Envelope { stocks: Vec<Quote> },
}

/// Parse quotes from a JSON document.
pub fn parse_quotes(raw: &str) -> Result<Vec<Quote>> {
    let feed: QuoteFeed = serde_json::from_str(raw)
        .context("Expected a JSON array of quotes or an object with a \"stocks\" array")?;

    let quotes = match feed {
        QuoteFeed::List(quotes) => quotes,
        QuoteFeed::Envelope { stocks } => stocks,
    };

    if let Some(bad) = quotes.iter().find(|q| q.symbol.trim().is_empty()) {
        bail!("Quote with empty symbol (name: {:?})", bad.name);
    }

    Ok(quotes)
}

/// Read and parse quotes from `path`, or stdin when `path` is "-".
pub async fn load_quotes(path: &str) -> Result<Vec<Quote>> {
    let raw = if path == STDIN_PATH {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read quotes from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read quotes from {}", path))?
    };

    let quotes = parse_quotes(&raw).with_context(|| format!("Invalid quote feed {}", path))?;
    info!(source = %path, count = quotes.len(), "Loaded quotes");

    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_array() {
        let raw = r#"[
            {"symbol": "RELIANCE", "name": "Reliance Industries", "price": 2450.5, "change": 30.2, "volume": 4200000},
            {"symbol": "ITC", "price": 410, "change": -1.5, "volume": 900000}
        ]"#;

        let quotes = parse_quotes(raw).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].price, dec!(2450.5));
        assert_eq!(quotes[1].name, "");
        assert_eq!(quotes[1].change, dec!(-1.5));
    }

    #[test]
    fn test_parse_envelope_ignores_extra_fields() {
        let raw = r#"{
            "success": true,
            "timestamp": "2024-01-15T09:30:00.000Z",
            "stocks": [
                {"symbol": "TCS", "name": "Tata Consultancy Services", "price": 3500, "change": 70,
                 "changePercent": 2.04, "volume": 3000000, "signal": "BREAKOUT", "entry": 3500}
            ]
        }"#;

        let quotes = parse_quotes(raw).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "TCS");
        assert_eq!(quotes[0].volume, 3_000_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_quotes(r#"{"quotes": []}"#).is_err());
        assert!(parse_quotes("not json").is_err());
        assert!(parse_quotes(r#"[{"symbol": " ", "price": 1, "change": 0}]"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("screener-feed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"symbol": "SBIN", "name": "State Bank of India", "price": 800, "change": 8, "volume": 2600000}]"#,
        )
        .unwrap();

        let quotes = tokio_test::block_on(load_quotes(path.to_str().unwrap())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "SBIN");
    }

    #[test]
    fn test_load_missing_file() {
        let result = tokio_test::block_on(load_quotes("/nonexistent/quotes.json"));
        assert!(result.is_err());
    }
}
