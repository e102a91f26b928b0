//! CLI command for exporting the transaction file

use std::path::PathBuf;

use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::storage::TransactionStore;

/// Arguments for `fintrack export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,
}

/// Copy every transaction to a CSV file of the caller's choosing
pub fn handle_export(store: &TransactionStore, args: ExportArgs) -> TrackerResult<()> {
    if store.is_empty() {
        return Err(TrackerError::Export("No transactions to export".into()));
    }

    store.export_to(&args.output)?;
    println!(
        "Exported {} transactions to: {}",
        store.len(),
        args.output.display()
    );
    Ok(())
}
