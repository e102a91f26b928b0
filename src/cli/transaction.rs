//! CLI commands for recording and listing transactions

use clap::Args;

use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::TrackerResult;
use crate::models::{EntryInput, DATE_FORMAT};
use crate::storage::TransactionStore;

/// Arguments for `fintrack add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (e.g. 12.50)
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Category name (see `fintrack categories`)
    pub category: String,

    /// Short description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Free-form note
    #[arg(short, long)]
    pub note: Option<String>,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `fintrack list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of transactions to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Validate and record one transaction
pub fn handle_add(store: &mut TransactionStore, settings: &Settings, args: AddArgs) -> TrackerResult<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive().format(DATE_FORMAT).to_string());

    let input = EntryInput {
        amount: Some(args.amount),
        category: Some(args.category),
        description: args.description,
        note: args.note,
        date: Some(date),
    };

    let entry = store.add(&input)?;

    println!(
        "Added {} to {} on {}",
        entry.amount().format_with_label(&settings.currency_label),
        entry.category(),
        entry.date().format(DATE_FORMAT)
    );
    Ok(())
}

/// Show the most recent transactions, newest first
pub fn handle_list(store: &TransactionStore, settings: &Settings, args: ListArgs) -> TrackerResult<()> {
    // Same-day entries: most recently added first
    let mut recent: Vec<_> = store.entries().iter().enumerate().collect();
    recent.sort_by(|(ia, a), (ib, b)| b.date().cmp(&a.date()).then(ib.cmp(ia)));

    let shown = recent.iter().take(args.limit).map(|(_, e)| *e);
    print!("{}", format_transaction_table(shown, &settings.currency_label));

    if store.len() > args.limit {
        println!("Showing {} of {} transactions", args.limit, store.len());
    }
    Ok(())
}
