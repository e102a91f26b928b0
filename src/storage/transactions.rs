//! Transaction store backed by a single CSV file
//!
//! The in-memory list is the single source of truth. Every mutation rewrites
//! the whole file atomically; there is no row-level append to the file.
//! Rows that could not be loaded are written back unchanged after the
//! entries. External writers to the same file are not coordinated with.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult, ValidationError};
use crate::models::{validate_entry, Category, EntryInput, Money, MonthKey, TransactionEntry};
use crate::reports::totals;

use super::csv_format::{read_entries, write_entries, write_file, LoadedEntries, RowError};
use super::file_io::write_atomic;

/// Ordered collection of transactions persisted to one file
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    entries: Vec<TransactionEntry>,
    skipped: Vec<RowError>,
}

impl TransactionStore {
    /// Create an empty store for `path` without touching the disk
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Open the store, loading any existing rows
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or has no
    /// usable header. Individual bad rows are skipped, see [`Self::skipped_rows`].
    pub fn open(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let loaded = Self::load(&path)?;

        Ok(Self {
            path,
            entries: loaded.entries,
            skipped: loaded.skipped,
        })
    }

    /// Open the store, falling back to an empty one if the file is unreadable
    ///
    /// The load error, if any, is handed back so the caller can report it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> (Self, Option<TrackerError>) {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => (store, None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Starting with an empty store");
                (Self::empty(path), Some(e))
            }
        }
    }

    /// Read a transaction file; a missing file yields no entries
    pub fn load(path: &Path) -> TrackerResult<LoadedEntries> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No transaction file yet");
            return Ok(LoadedEntries::default());
        }

        let file = File::open(path).map_err(|e| {
            TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let loaded = read_entries(BufReader::new(file)).map_err(|e| match e {
            TrackerError::Parse(msg) => {
                TrackerError::Parse(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })?;

        for skipped in &loaded.skipped {
            tracing::warn!(
                path = %path.display(),
                row = skipped.row,
                reason = %skipped.reason,
                "Skipping invalid transaction row"
            );
        }
        tracing::debug!(
            path = %path.display(),
            entries = loaded.entries.len(),
            skipped = loaded.skipped.len(),
            "Loaded transactions"
        );

        Ok(loaded)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[TransactionEntry] {
        &self.entries
    }

    /// Rows dropped during the last load
    pub fn skipped_rows(&self) -> &[RowError] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and persist the full set
    ///
    /// The store is unchanged if the amount is not positive or the write fails.
    pub fn append(&mut self, entry: TransactionEntry) -> TrackerResult<()> {
        if !entry.amount().is_positive() {
            return Err(ValidationError::NonPositiveAmount.into());
        }

        self.entries.push(entry);
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "Appended transaction");
        Ok(())
    }

    /// Validate raw input and append the resulting entry
    pub fn add(&mut self, input: &EntryInput) -> TrackerResult<TransactionEntry> {
        let entry = validate_entry(input)?;
        self.append(entry.clone())?;
        Ok(entry)
    }

    /// Rewrite the backing file from memory, keeping rows that failed to load
    pub fn save(&self) -> TrackerResult<()> {
        write_atomic(&self.path, |writer| {
            write_file(writer, &self.entries, &self.skipped)
        })
    }

    /// Write every entry to `path` in the transaction file format
    pub fn export_to(&self, path: impl AsRef<Path>) -> TrackerResult<()> {
        let path = path.as_ref();
        write_atomic(path, |writer| write_entries(writer, &self.entries)).map_err(|e| {
            TrackerError::Export(format!("Failed to export to {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), count = self.entries.len(), "Exported transactions");
        Ok(())
    }

    /// Sum of amounts per category
    pub fn aggregate_by_category(&self) -> BTreeMap<Category, Money> {
        totals::by_category(&self.entries)
    }

    /// Sum of amounts per calendar month, oldest first
    pub fn aggregate_by_month(&self) -> BTreeMap<MonthKey, Money> {
        totals::by_month(&self.entries)
    }

    /// Month x category sums with zero-filled gaps
    pub fn aggregate_by_month_and_category(&self) -> BTreeMap<MonthKey, BTreeMap<Category, Money>> {
        totals::by_month_and_category(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, TransactionStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        let store = TransactionStore::open(path).unwrap();
        (temp_dir, store)
    }

    fn entry(cents: i64, category: Category, day: NaiveDate) -> TransactionEntry {
        TransactionEntry::new(Money::from_cents(cents), category, day)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.is_empty());
        assert!(store.skipped_rows().is_empty());
        assert!(store.aggregate_by_category().is_empty());
    }

    #[test]
    fn test_append_persists_and_updates_totals() {
        let (temp_dir, mut store) = create_test_store();

        store.append(entry(1000, Category::Food, date(2024, 1, 1))).unwrap();
        let before = store.aggregate_by_category()[&Category::Food];

        store.append(entry(250, Category::Food, date(2024, 1, 2))).unwrap();
        assert_eq!(
            store.aggregate_by_category()[&Category::Food],
            before + Money::from_cents(250)
        );

        let reopened = TransactionStore::open(temp_dir.path().join("transactions.csv")).unwrap();
        assert_eq!(reopened.entries(), store.entries());
    }

    #[test]
    fn test_append_rejects_non_positive_amount() {
        let (_temp_dir, mut store) = create_test_store();
        store.append(entry(100, Category::Other, date(2024, 1, 1))).unwrap();

        for cents in [0, -500] {
            let err = store
                .append(entry(cents, Category::Other, date(2024, 1, 1)))
                .unwrap_err();
            assert!(matches!(
                err,
                TrackerError::Validation(ValidationError::NonPositiveAmount)
            ));
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_input_without_changes() {
        let (temp_dir, mut store) = create_test_store();

        let bad_inputs = [
            EntryInput::new("abc", "Food", "2024-01-01"),
            EntryInput::new("-1", "Food", "2024-01-01"),
            EntryInput::new("0", "Food", "2024-01-01"),
            EntryInput::new("5", "", "2024-01-01"),
        ];
        for input in &bad_inputs {
            assert!(store.add(input).unwrap_err().is_validation());
        }

        assert_eq!(store.len(), 0);
        assert!(!temp_dir.path().join("transactions.csv").exists());
    }

    #[test]
    fn test_add_valid_input() {
        let (_temp_dir, mut store) = create_test_store();
        let input = EntryInput::new("42.10", "Healthcare", "2024-04-04").description("Pharmacy");

        let entry = store.add(&input).unwrap();

        assert_eq!(store.entries(), &[entry]);
        assert_eq!(
            store.aggregate_by_category()[&Category::Healthcare],
            Money::from_cents(4210)
        );
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("transactions.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();
        let mut store = TransactionStore::empty(&path);

        let result = store.append(entry(100, Category::Food, date(2024, 1, 1)));

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_malformed_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(
            &path,
            "Date,Amount,Category,Description\n2024-01-15,100,Food,ok\n2024-01-16,abc,Food,bad\n",
        )
        .unwrap();

        let store = TransactionStore::open(&path).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.skipped_rows().len(), 1);
    }

    #[test]
    fn test_add_keeps_rows_outside_the_category_set() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(
            &path,
            "Date,Amount,Category,Description\n\
             2024-01-01,10,Groceries,weekly\n\
             2024-01-02,5,Food,tea\n",
        )
        .unwrap();

        let mut store = TransactionStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.skipped_rows().is_empty());

        store
            .add(&EntryInput::new("3", "Food", "2024-01-03"))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Date,Amount,Category,Description,Note\n\
             2024-01-01,10.00,Groceries,weekly,\n\
             2024-01-02,5.00,Food,tea,\n\
             2024-01-03,3.00,Food,,\n"
        );
        assert_eq!(
            store.aggregate_by_category()[&Category::Custom("Groceries".into())],
            Money::from_cents(1000)
        );
    }

    #[test]
    fn test_add_writes_back_rows_that_failed_to_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(
            &path,
            "Date,Amount,Category,Description\n\
             someday,10,Food,lost?\n\
             2024-01-02,5,Food,tea\n",
        )
        .unwrap();

        let mut store = TransactionStore::open(&path).unwrap();
        assert_eq!(store.skipped_rows().len(), 1);

        store
            .add(&EntryInput::new("3", "Food", "2024-01-03"))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("someday,10,Food,lost?,\n"));

        let reopened = TransactionStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.skipped_rows().len(), 1);
    }

    #[test]
    fn test_large_amounts_do_not_overflow_totals() {
        let (_temp_dir, mut store) = create_test_store();
        let max = Money::parse("1000000000000").unwrap();

        for _ in 0..3 {
            store.append(entry(max.cents(), Category::Food, date(2024, 1, 1))).unwrap();
        }

        assert_eq!(
            store.aggregate_by_category()[&Category::Food],
            Money::from_cents(3 * Money::MAX_ABS_CENTS)
        );
        assert!(store
            .add(&EntryInput::new("90000000000000000", "Food", "2024-01-01"))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_open_or_empty_degrades_on_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(&path, "Nothing,Useful\n1,2\n").unwrap();

        let (store, error) = TransactionStore::open_or_empty(&path);

        assert!(store.is_empty());
        assert!(matches!(error, Some(TrackerError::Parse(_))));
    }

    #[test]
    fn test_export_round_trip() {
        let (temp_dir, mut store) = create_test_store();
        store
            .append(entry(10000, Category::Food, date(2024, 1, 15)).with_description("Groceries"))
            .unwrap();
        store
            .append(entry(5000, Category::Food, date(2024, 1, 15)).with_description("Groceries"))
            .unwrap();
        store
            .append(entry(3000, Category::Utilities, date(2024, 2, 1)).with_note("water"))
            .unwrap();
        store
            .append(entry(5000, Category::Food, date(2024, 1, 15)).with_description("Groceries"))
            .unwrap();

        let export_path = temp_dir.path().join("out").join("export.csv");
        store.export_to(&export_path).unwrap();
        let loaded = TransactionStore::load(&export_path).unwrap();

        let multiset = |entries: &[TransactionEntry]| {
            let mut counts: HashMap<_, usize> = HashMap::new();
            for e in entries {
                *counts
                    .entry((e.date(), e.amount(), e.category().clone(), e.description().to_string()))
                    .or_default() += 1;
            }
            counts
        };
        assert_eq!(multiset(&loaded.entries), multiset(store.entries()));
        assert_eq!(loaded.entries[2].note(), Some("water"));
    }

    #[test]
    fn test_export_to_unwritable_path_fails() {
        let (temp_dir, store) = create_test_store();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = store.export_to(blocker.join("export.csv")).unwrap_err();
        assert!(matches!(err, TrackerError::Export(_)));
    }

    #[test]
    fn test_aggregate_by_month_order() {
        let (_temp_dir, mut store) = create_test_store();
        store.append(entry(3000, Category::Other, date(2024, 2, 1))).unwrap();
        store.append(entry(10000, Category::Food, date(2024, 1, 15))).unwrap();
        store.append(entry(5000, Category::Food, date(2024, 1, 20))).unwrap();

        let by_month: Vec<_> = store
            .aggregate_by_month()
            .into_iter()
            .map(|(month, total)| (month.to_string(), total))
            .collect();

        assert_eq!(
            by_month,
            vec![
                ("2024-01".to_string(), Money::from_cents(15000)),
                ("2024-02".to_string(), Money::from_cents(3000)),
            ]
        );
    }
}
