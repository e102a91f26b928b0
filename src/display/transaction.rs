//! Transaction display formatting
//!
//! Register-style tables for the terminal.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{TransactionEntry, DATE_FORMAT};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl TransactionRow {
    fn from_entry(entry: &TransactionEntry, currency_label: &str) -> Self {
        Self {
            date: entry.date().format(DATE_FORMAT).to_string(),
            category: entry.category().to_string(),
            amount: entry.amount().format_with_label(currency_label),
            description: truncate(entry.description(), 30),
            note: truncate(entry.note().unwrap_or(""), 20),
        }
    }
}

/// Format entries as a table, in the order given
pub fn format_transaction_table<'a, I>(entries: I, currency_label: &str) -> String
where
    I: IntoIterator<Item = &'a TransactionEntry>,
{
    let rows: Vec<_> = entries
        .into_iter()
        .map(|e| TransactionRow::from_entry(e, currency_label))
        .collect();

    if rows.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Cut a string to `max` characters, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
