//! Quote model: a single market snapshot for one equity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw price/volume snapshot supplied by a market-data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Exchange ticker (e.g., "RELIANCE")
    pub symbol: String,

    /// Company name for display
    #[serde(default)]
    pub name: String,

    /// Last traded price
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,

    /// Absolute change from the previous close
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub change: Decimal,

    /// Shares traded in the session
    #[serde(default)]
    pub volume: u64,
}

#[cfg(test)]
impl Quote {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        change: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let json = r#"{"symbol":"INFY","name":"Infosys","price":1520.35,"change":"12.5","volume":3100000}"#;
        let quote: Quote = serde_json::from_str(json).unwrap();

        assert_eq!(quote.symbol, "INFY");
        assert_eq!(quote.price, dec!(1520.35));
        assert_eq!(quote.change, dec!(12.5));
        assert_eq!(quote.volume, 3_100_000);
    }

    #[test]
    fn test_missing_name_and_volume_default() {
        let quote: Quote = serde_json::from_str(r#"{"symbol":"TCS","price":3500,"change":-25}"#).unwrap();
        assert_eq!(quote.name, "");
        assert_eq!(quote.volume, 0);
        assert_eq!(quote, Quote::new("TCS", "", dec!(3500), dec!(-25), 0));
    }
}
