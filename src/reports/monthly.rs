//! Monthly trend report
//!
//! Total spending per month plus a month x category breakdown.

use std::collections::BTreeMap;
use std::io::Write;

use crate::display::report::format_breakdown_table;
use crate::display::{BarChart, ChartSpec};
use crate::error::TrackerResult;
use crate::models::{Category, Money, MonthKey, TransactionEntry};

use super::totals;

/// Monthly totals and per-category breakdown, oldest month first
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub months: BTreeMap<MonthKey, Money>,
    pub breakdown: BTreeMap<MonthKey, BTreeMap<Category, Money>>,
    pub total: Money,
}

impl MonthlyReport {
    pub fn generate(entries: &[TransactionEntry]) -> Self {
        Self {
            months: totals::by_month(entries),
            breakdown: totals::by_month_and_category(entries),
            total: totals::grand_total(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Categories present in the breakdown, in display order
    pub fn categories(&self) -> Vec<Category> {
        self.breakdown
            .values()
            .next()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Average spending over the months that have any
    pub fn monthly_average(&self) -> Money {
        if self.months.is_empty() {
            return Money::zero();
        }
        Money::from_cents(self.total.cents() / self.months.len() as i64)
    }

    /// Chart input for the monthly trend
    pub fn chart_spec(&self, currency_label: &str) -> ChartSpec {
        ChartSpec::new("Monthly Spending Trend", "Month", "Total Amount", currency_label)
            .with_points(self.months.iter().map(|(month, total)| (*month, *total)))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, chart: &BarChart, currency_label: &str) -> String {
        if self.is_empty() {
            return "No transactions recorded\n".to_string();
        }

        let mut output = String::from("Monthly Financial Analysis\n\n");
        output.push_str(&chart.render(&self.chart_spec(currency_label)));
        output.push_str(&format!(
            "\nMonthly average: {}\n\n",
            self.monthly_average().format_with_label(currency_label)
        ));

        output.push_str("Monthly Category Breakdown\n");
        output.push_str(&format_breakdown_table(&self.breakdown, currency_label));

        output
    }

    /// Export the breakdown to CSV, one row per month
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let columns = self.categories();

        let mut csv = csv::Writer::from_writer(writer);
        let mut header = vec!["Month".to_string()];
        header.extend(columns.iter().map(|c| c.to_string()));
        header.push("Total".to_string());
        csv.write_record(&header)?;

        for (month, row) in &self.breakdown {
            let mut record = vec![month.to_string()];
            record.extend(
                columns
                    .iter()
                    .map(|c| row.get(c).copied().unwrap_or_default().to_string()),
            );
            record.push(self.months.get(month).copied().unwrap_or_default().to_string());
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}
