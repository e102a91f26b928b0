//! Spending by Category report

use std::io::Write;

use crate::display::report::{format_percentage, percentage_of};
use crate::display::{BarChart, ChartSpec};
use crate::error::TrackerResult;
use crate::models::{Category, Money, TransactionEntry};

use super::totals;

/// One category line of the report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: Category,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of all spending, in percent
    pub percentage: f64,
}

/// Spending per category, largest first
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub rows: Vec<CategoryRow>,
    pub total: Money,
    pub transaction_count: usize,
}

impl CategoryReport {
    pub fn generate(entries: &[TransactionEntry]) -> Self {
        let total = totals::grand_total(entries);

        let mut rows: Vec<CategoryRow> = totals::by_category(entries)
            .into_iter()
            .map(|(category, amount)| CategoryRow {
                transaction_count: entries.iter().filter(|e| *e.category() == category).count(),
                category,
                total: amount,
                percentage: percentage_of(amount, total),
            })
            .collect();
        // Stable sort keeps category order for equal totals
        rows.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            rows,
            total,
            transaction_count: entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Chart input for the rendering side
    pub fn chart_spec(&self, currency_label: &str) -> ChartSpec {
        ChartSpec::new("Spending by Category", "Categories", "Amount", currency_label)
            .with_points(self.rows.iter().map(|r| (r.category.clone(), r.total)))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, chart: &BarChart, currency_label: &str) -> String {
        if self.is_empty() {
            return "No transactions recorded\n".to_string();
        }

        let mut output = chart.render(&self.chart_spec(currency_label));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>18} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(57));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>18} {:>8} {:>8}\n",
                row.category.name(),
                row.total.format_with_label(currency_label),
                row.transaction_count,
                format_percentage(row.percentage)
            ));
        }

        output.push_str(&"-".repeat(57));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>18} {:>8}\n",
            "TOTAL",
            self.total.format_with_label(currency_label),
            self.transaction_count
        ));

        output
    }

    /// Export the report rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Amount", "Transactions", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                row.category.name().to_string(),
                row.total.to_string(),
                row.transaction_count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.write_record([
            "TOTAL".to_string(),
            self.total.to_string(),
            self.transaction_count.to_string(),
            if self.is_empty() { "0.00" } else { "100.00" }.to_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
