//! CLI commands for reports
//!
//! Prints the category and monthly reports, or writes them to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::display::BarChart;
use crate::error::{TrackerError, TrackerResult};
use crate::reports::{CategoryReport, MonthlyReport};
use crate::storage::TransactionStore;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per category, largest first
    #[command(alias = "category")]
    Categories {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Monthly totals with a per-category breakdown
    #[command(alias = "month")]
    Monthly {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    store: &TransactionStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let chart = BarChart::new(settings.chart.clone());

    match cmd {
        ReportCommands::Categories { output } => {
            let report = CategoryReport::generate(store.entries());
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Category report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&chart, &settings.currency_label)),
            }
        }
        ReportCommands::Monthly { output } => {
            let report = MonthlyReport::generate(store.entries());
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Monthly report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&chart, &settings.currency_label)),
            }
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> TrackerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
