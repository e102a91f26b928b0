//! Storage layer for fintrack
//!
//! One CSV file holds every transaction. Writes go through a temp file and a
//! rename so a crash never leaves a half-written file behind.

pub mod csv_format;
pub mod file_io;
pub mod transactions;

pub use csv_format::{read_entries, write_entries, write_file, LoadedEntries, RowError};
pub use file_io::write_atomic;
pub use transactions::TransactionStore;

use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerResult;

/// Create the data directory and default settings if they are missing
///
/// Returns `true` when settings were written, `false` if already initialized.
pub fn initialize_storage(paths: &TrackerPaths) -> TrackerResult<bool> {
    paths.ensure_directories()?;

    if paths.is_initialized() {
        return Ok(false);
    }

    Settings::default().save(paths)?;
    tracing::debug!(dir = %paths.base_dir().display(), "Initialized data directory");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().join("fintrack"));

        assert!(!paths.is_initialized());
        assert!(initialize_storage(&paths).unwrap());
        assert!(paths.settings_file().exists());
        assert!(paths.is_initialized());

        // Second run leaves existing settings alone
        assert!(!initialize_storage(&paths).unwrap());
    }
}
