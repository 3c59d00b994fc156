//! Built-in rates used whenever the live feed cannot be used

use crate::core::table::RateTable;
use tracing::{error, warn};

const FALLBACK_BASE: &str = "RUB";

// Units of each currency per 1 RUB.
const FALLBACK_RATES: [(&str, f64); 8] = [
    ("USD", 0.011),
    ("EUR", 0.010),
    ("GBP", 0.0085),
    ("JPY", 1.45),
    ("CNY", 0.078),
    ("KZT", 5.0),
    ("CAD", 0.014),
    ("AUD", 0.016),
];

/// Every currency code the fallback table can express, base included.
pub const FALLBACK_CODES: [&str; 9] = [
    "RUB", "USD", "EUR", "GBP", "JPY", "CNY", "KZT", "CAD", "AUD",
];

fn builtin() -> RateTable {
    RateTable::from_rates(FALLBACK_BASE, FALLBACK_RATES).unwrap_or_else(|e| {
        error!(error = %e, "Built-in fallback rates are invalid");
        RateTable::new(FALLBACK_BASE)
    })
}

/// Returns the built-in rate table expressed against `base`.
///
/// When `base` is not one of [`FALLBACK_CODES`] the table stays on its own
/// base. Configuration validation rejects such a base before it gets here.
pub fn fallback_table(base: &str) -> RateTable {
    let table = builtin();
    if base == FALLBACK_BASE {
        return table;
    }
    match table.rebased(base) {
        Ok(rebased) => rebased,
        Err(e) => {
            warn!(base, error = %e, "Fallback rates cannot be expressed in base currency");
            table
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_contains_all_codes() {
        let table = fallback_table("RUB");
        assert_eq!(table.len(), FALLBACK_CODES.len());
        for code in FALLBACK_CODES {
            assert!(table.contains(code), "missing {code}");
        }
        assert_eq!(table.get("RUB"), Some(1.0));
        assert_eq!(table.get("USD"), Some(0.011));
        assert_eq!(table.get("EUR"), Some(0.010));
    }

    #[test]
    fn test_builtin_keeps_every_rate() {
        let table = builtin();
        assert_eq!(table.base(), FALLBACK_BASE);
        for (code, rate) in FALLBACK_RATES {
            assert_eq!(table.get(code), Some(rate), "wrong rate for {code}");
        }
    }

    #[test]
    fn test_fallback_rebased_onto_other_base() {
        let table = fallback_table("USD");
        assert_eq!(table.base(), "USD");
        assert_eq!(table.get("USD"), Some(1.0));
        assert!((table.get("RUB").unwrap() - 1.0 / 0.011).abs() < 1e-9);
        assert!((table.get("EUR").unwrap() - 0.010 / 0.011).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_with_unsupported_base_keeps_builtin() {
        let table = fallback_table("CHF");
        assert_eq!(table.base(), "RUB");
        assert_eq!(table.len(), FALLBACK_CODES.len());
    }
}
