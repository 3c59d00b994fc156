//! Auxiliary rates derived from a resolved table for display

use crate::core::error::{FxError, Result};
use crate::core::table::RateTable;

/// Amount of base currency worth one unit of `code`.
pub fn inverse_rate(table: &RateTable, code: &str) -> Result<f64> {
    let rate = table.rate(code)?;
    if rate == 0.0 {
        return Err(FxError::ZeroRate(code.to_string()));
    }
    Ok(1.0 / rate)
}

/// Units of `to` worth one unit of `from`.
pub fn cross_rate(table: &RateTable, from: &str, to: &str) -> Result<f64> {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    if from_rate == 0.0 {
        return Err(FxError::ZeroRate(from.to_string()));
    }
    Ok(to_rate / from_rate)
}

/// One row of the major currencies overview.
#[derive(Debug, Clone, PartialEq)]
pub struct MajorRate {
    pub code: String,
    /// Base currency per one unit of `code`.
    pub per_base: f64,
    /// Reference currency per one unit of `code`, if the reference is known.
    pub per_reference: Option<f64>,
}

/// Builds the overview rows for `majors`, skipping codes absent from `table`.
pub fn major_rates(table: &RateTable, majors: &[String], reference: &str) -> Vec<MajorRate> {
    majors
        .iter()
        .filter_map(|code| {
            let per_base = inverse_rate(table, code).ok()?;
            Some(MajorRate {
                code: code.clone(),
                per_base,
                per_reference: cross_rate(table, code, reference).ok(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::from_rates("RUB", [("USD", 1.0 / 90.5), ("EUR", 1.0 / 100.0)]).unwrap()
    }

    #[test]
    fn test_inverse_rate() {
        let table = table();
        assert!((inverse_rate(&table, "USD").unwrap() - 90.5).abs() < 1e-9);
        assert_eq!(inverse_rate(&table, "RUB").unwrap(), 1.0);
    }

    #[test]
    fn test_inverse_rate_unknown_code() {
        assert_eq!(
            inverse_rate(&table(), "XYZ"),
            Err(FxError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_cross_rate() {
        let table = table();
        // 1 EUR = 100 RUB = 100 / 90.5 USD
        let eur_in_usd = cross_rate(&table, "EUR", "USD").unwrap();
        assert!((eur_in_usd - 100.0 / 90.5).abs() < 1e-9);
        let usd_in_eur = cross_rate(&table, "USD", "EUR").unwrap();
        assert!((eur_in_usd * usd_in_eur - 1.0).abs() < 1e-12);
        assert_eq!(cross_rate(&table, "USD", "USD").unwrap(), 1.0);
    }

    #[test]
    fn test_cross_rate_unknown_code() {
        let table = table();
        assert!(matches!(
            cross_rate(&table, "USD", "XYZ"),
            Err(FxError::UnknownCurrency(code)) if code == "XYZ"
        ));
        assert!(matches!(
            cross_rate(&table, "XYZ", "USD"),
            Err(FxError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn test_major_rates_skips_missing_codes() {
        let table = table();
        let majors = vec!["USD".to_string(), "JPY".to_string(), "EUR".to_string()];
        let rows = major_rates(&table, &majors, "USD");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "USD");
        assert!((rows[0].per_base - 90.5).abs() < 1e-9);
        assert_eq!(rows[0].per_reference, Some(1.0));
        assert_eq!(rows[1].code, "EUR");
        assert!((rows[1].per_reference.unwrap() - 100.0 / 90.5).abs() < 1e-9);
    }

    #[test]
    fn test_major_rates_without_reference() {
        let table = table();
        let rows = major_rates(&table, &["EUR".to_string()], "GBP");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].per_reference.is_none());
    }
}
