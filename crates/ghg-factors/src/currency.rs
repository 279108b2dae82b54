//! # Currency Rates
//!
//! Spend-based factors are expressed per US dollar. The currency table maps
//! an ISO 4217 code to the multiplier that converts one unit of that currency
//! into the base currency. Rates are static reference data shipped with the
//! factor set, not live market rates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The base currency all spend factors are expressed in.
pub const BASE_CURRENCY: &str = "USD";

/// Currency code → multiplier into [`BASE_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl CurrencyTable {
    /// A table containing only the base currency at 1.0.
    pub fn base_only() -> Self {
        Self::from_rates([(BASE_CURRENCY, 1.0)])
    }

    /// Build a table from `(code, rate)` pairs.
    pub fn from_rates<'a>(rates: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.to_owned(), rate))
                .collect(),
        }
    }

    /// The multiplier for `code`, or `None` when the code is not listed.
    ///
    /// Lookup is exact: codes are upper-case ISO 4217.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// All rates in code order.
    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    /// Number of listed currencies.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table lists no currencies.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::base_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        let table = CurrencyTable::from_rates([("USD", 1.0), ("EUR", 1.08)]);
        assert_eq!(table.rate("EUR"), Some(1.08));
        assert_eq!(table.rate("eur"), None);
        assert_eq!(table.rate("JPY"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn default_is_base_only() {
        let table = CurrencyTable::default();
        assert_eq!(table.rate(BASE_CURRENCY), Some(1.0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn serializes_as_plain_map() {
        let table = CurrencyTable::from_rates([("GBP", 1.27)]);
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"GBP":1.27}"#);
    }
}
