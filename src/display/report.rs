//! Report formatting utilities for terminal output

use std::collections::BTreeMap;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{Category, Money, MonthKey};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Share of `part` in `whole`, in percent
pub fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

/// Month rows x category columns, with a total column
pub fn format_breakdown_table(
    table: &BTreeMap<MonthKey, BTreeMap<Category, Money>>,
    currency_label: &str,
) -> String {
    let columns: Vec<Category> = table
        .values()
        .next()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    let mut header = vec!["Month".to_string()];
    header.extend(columns.iter().map(|c| c.to_string()));
    header.push("Total".to_string());
    builder.push_record(header);

    for (month, row) in table {
        let mut record = vec![month.to_string()];
        record.extend(
            columns
                .iter()
                .map(|c| row.get(c).copied().unwrap_or_default().format_with_label("")),
        );
        let total: Money = row.values().sum();
        record.push(total.format_with_label(currency_label));
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    format!("{}\n", rendered)
}
