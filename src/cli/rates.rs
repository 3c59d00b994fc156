use super::ui;
use crate::core::metrics::{MajorRate, major_rates};
use crate::core::{RateSource, RateStore, RateTable};
use anyhow::Result;
use comfy_table::Cell;

/// Renders the supported currency list and the major currencies overview.
pub fn display_rates(table: &RateTable, majors: &[MajorRate], reference: &str) -> String {
    let base = table.base();
    let codes: Vec<_> = table.codes().collect();

    let mut output = match table.as_of() {
        Some(date) => format!(
            "Rates as of {}\n\n",
            ui::style_text(&date.format("%Y-%m-%d").to_string(), ui::StyleType::Title)
        ),
        None => String::new(),
    };
    output.push_str(&format!(
        "{} currencies supported: {}\n\n",
        codes.len(),
        codes.join(", ")
    ));

    let mut rates_table = ui::new_styled_table();
    rates_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate ({base})")),
        ui::header_cell(&format!("Rate ({reference})")),
    ]);
    for row in majors {
        rates_table.add_row(vec![
            Cell::new(&row.code),
            ui::rate_cell(row.per_base, 2),
            ui::format_optional_cell(row.per_reference, |r| format!("{r:.4}")),
        ]);
    }
    output.push_str(&rates_table.to_string());

    output
}

pub fn run<S: RateSource>(store: &RateStore<S>, majors: &[String], reference: &str) -> Result<()> {
    if let Some(notice) = ui::origin_notice(store.current()) {
        println!("{notice}\n");
    }

    let table = store.snapshot();
    let rows = major_rates(&table, majors, reference);
    println!("{}", display_rates(&table, &rows, reference));
    Ok(())
}
