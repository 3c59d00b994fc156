//! Converts amounts between currencies through the base currency of a rate table

use crate::core::error::Result;
use crate::core::table::RateTable;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept in converted amounts.
pub const RESULT_DECIMALS: u32 = 2;

/// Either the converted amount or the reason it could not be computed.
pub type ConversionResult = Result<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Self {
        ConversionRequest {
            amount,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn apply(&self, table: &RateTable) -> ConversionResult {
        convert(self.amount, &self.from, &self.to, table)
    }
}

/// Rounds to [`RESULT_DECIMALS`] places, ties to even (banker's rounding).
///
/// Values outside the range of `Decimal` are returned as is.
pub fn round_amount(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(RESULT_DECIMALS, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Converts `amount` of `from` into `to`.
///
/// Both codes must be in `table`. Converting a currency into itself returns
/// `amount` untouched; any other result is rounded with [`round_amount`].
pub fn convert(amount: f64, from: &str, to: &str, table: &RateTable) -> ConversionResult {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;

    if from == to {
        return Ok(amount);
    }

    let amount_in_base = amount / from_rate;
    Ok(round_amount(amount_in_base * to_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FxError;
    use crate::core::fallback::{FALLBACK_CODES, fallback_table};

    fn live_table() -> RateTable {
        RateTable::from_rates("RUB", [("USD", 1.0 / 90.50), ("HALF", 0.5)]).unwrap()
    }

    #[test]
    fn test_convert_base_to_usd() {
        let table = live_table();
        assert_eq!(convert(100.0, "RUB", "USD", &table).unwrap(), 1.10);
    }

    #[test]
    fn test_convert_with_fallback_rates() {
        let table = fallback_table("RUB");
        assert_eq!(convert(100.0, "USD", "EUR", &table).unwrap(), 90.91);
    }

    #[test]
    fn test_identity_returns_amount_unrounded() {
        let table = live_table();
        for amount in [0.0, 1.0 / 3.0, 123.456789, -5.5] {
            assert_eq!(convert(amount, "USD", "USD", &table).unwrap(), amount);
        }
    }

    #[test]
    fn test_unknown_target_currency() {
        let table = live_table();
        for amount in [0.0, 1.0, 250.0] {
            assert_eq!(
                convert(amount, "RUB", "XYZ", &table),
                Err(FxError::UnknownCurrency("XYZ".to_string()))
            );
        }
    }

    #[test]
    fn test_unknown_source_currency_reported_first() {
        let table = live_table();
        assert_eq!(
            convert(1.0, "ABC", "XYZ", &table),
            Err(FxError::UnknownCurrency("ABC".to_string()))
        );
    }

    #[test]
    fn test_unknown_code_converted_into_itself_fails() {
        let table = live_table();
        assert!(matches!(
            convert(1.0, "XYZ", "XYZ", &table),
            Err(FxError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_zero_amount_is_a_valid_result() {
        let table = live_table();
        assert_eq!(convert(0.0, "RUB", "USD", &table), Ok(0.0));
    }

    #[test]
    fn test_negative_amount_is_computed() {
        let table = live_table();
        assert_eq!(convert(-100.0, "RUB", "USD", &table).unwrap(), -1.10);
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        let table = live_table();
        // 20.25 * 0.5 = 10.125 and 20.75 * 0.5 = 10.375, both exact in binary
        assert_eq!(convert(20.25, "RUB", "HALF", &table).unwrap(), 10.12);
        assert_eq!(convert(20.75, "RUB", "HALF", &table).unwrap(), 10.38);
        assert_eq!(round_amount(0.125), 0.12);
        assert_eq!(round_amount(0.375), 0.38);
        assert_eq!(round_amount(-0.125), -0.12);
        assert_eq!(round_amount(2.3449), 2.34);
    }

    #[test]
    fn test_round_trip_within_rounding_tolerance() {
        let table = fallback_table("RUB");
        let amount = 1234.56;
        for a in FALLBACK_CODES {
            for b in FALLBACK_CODES {
                let there = convert(amount, a, b, &table).unwrap();
                let back = convert(there, b, a, &table).unwrap();
                // Half a cent lost on each leg, the first one scaled back into `a`
                let ratio = table.get(a).unwrap() / table.get(b).unwrap();
                let tolerance = 0.005 * ratio + 0.005 + 1e-9;
                assert!(
                    (back - amount).abs() <= tolerance,
                    "{a}->{b}->{a}: {back} vs {amount}"
                );
            }
        }
    }

    #[test]
    fn test_request_apply() {
        let table = live_table();
        let request = ConversionRequest::new(100.0, "RUB", "USD");
        assert_eq!(request.apply(&table), Ok(1.10));
    }
}
