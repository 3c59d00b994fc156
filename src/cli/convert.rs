use super::ui;
use crate::core::{RateSource, RateStore, metrics};
use anyhow::{Context, Result, bail};

/// Formats a finished conversion together with the rate that produced it.
pub fn display_conversion(amount: f64, from: &str, result: f64, to: &str, unit_rate: f64) -> String {
    let converted = ui::style_text(
        &format!("{} {to}", ui::format_amount(result)),
        ui::StyleType::Value,
    );
    format!(
        "{} {from} = {converted}\n{}",
        ui::format_amount(amount),
        ui::style_text(
            &format!("1 {to} = {unit_rate:.4} {from}"),
            ui::StyleType::Subtle
        )
    )
}

pub fn run<S: RateSource>(store: &RateStore<S>, amount: f64, from: &str, to: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be a positive number, got {amount}");
    }
    let from = from.trim().to_uppercase();
    let to = to.trim().to_uppercase();

    if let Some(notice) = ui::origin_notice(store.current()) {
        println!("{notice}\n");
    }

    let supported = || {
        let table = store.snapshot();
        format!(
            "Supported currencies: {}",
            table.codes().collect::<Vec<_>>().join(", ")
        )
    };
    let result = store.convert(amount, &from, &to).with_context(supported)?;
    let unit_rate = metrics::cross_rate(&store.snapshot(), &to, &from)?;

    println!("{}", display_conversion(amount, &from, result, &to, unit_rate));
    Ok(())
}
