//! The resolved set of exchange rates against a single base currency

use crate::core::error::{FxError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Mapping from currency code to the number of units of that currency
/// worth one unit of the base currency.
///
/// The base currency is always present at exactly `1.0` and every other
/// rate is finite and strictly positive. Codes iterate in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    as_of: Option<NaiveDate>,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new(base: &str) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(base.to_string(), 1.0);
        RateTable {
            base: base.to_string(),
            as_of: None,
            rates,
        }
    }

    /// Builds a table from `(code, rate)` pairs, failing on the first invalid rate.
    pub fn from_rates<'a>(
        base: &str,
        rates: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self> {
        let mut table = Self::new(base);
        for (code, rate) in rates {
            table.insert(code, rate)?;
        }
        Ok(table)
    }

    pub fn with_as_of(mut self, as_of: Option<NaiveDate>) -> Self {
        self.as_of = as_of;
        self
    }

    /// Inserts or replaces the rate for `code`.
    ///
    /// The base currency is pinned to `1.0`, so inserting it is a no-op.
    pub fn insert(&mut self, code: &str, rate: f64) -> Result<()> {
        if code == self.base {
            return Ok(());
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxError::InvalidRate {
                code: code.to_string(),
                rate,
            });
        }
        self.rates.insert(code.to_string(), rate);
        Ok(())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Publication date of the feed the table came from, when known.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn rate(&self, code: &str) -> Result<f64> {
        self.get(code)
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Re-expresses every rate against `new_base`.
    pub fn rebased(&self, new_base: &str) -> Result<RateTable> {
        let divisor = self.rate(new_base)?;
        let mut table = RateTable::new(new_base).with_as_of(self.as_of);
        for (code, rate) in self.iter() {
            table.insert(code, rate / divisor)?;
        }
        Ok(table)
    }
}
