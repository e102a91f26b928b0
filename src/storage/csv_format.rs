//! CSV layout of the transaction file
//!
//! Header: `Date,Amount,Category,Description,Note`. Columns are located by
//! header name, so files without a `Note` column and rows shorter than the
//! header are accepted. Category labels are free-form. Rows that fail to
//! parse are reported, not fatal, and their raw fields are kept so a rewrite
//! of the file does not lose them.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Money, TransactionEntry, DATE_FORMAT};

/// Column names, in the order they are written
pub const HEADER: [&str; 5] = ["Date", "Amount", "Category", "Description", "Note"];

/// A data row that was not turned into an entry while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub reason: String,
    /// Raw field values in [`HEADER`] order
    pub fields: Vec<String>,
}

/// Result of reading a transaction file
#[derive(Debug, Clone, Default)]
pub struct LoadedEntries {
    pub entries: Vec<TransactionEntry>,
    pub skipped: Vec<RowError>,
}

#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    date: usize,
    amount: usize,
    category: usize,
    description: Option<usize>,
    note: Option<usize>,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> TrackerResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                TrackerError::Parse(format!("Missing required column '{}'", name))
            })
        };

        Ok(Self {
            date: required("Date")?,
            amount: required("Amount")?,
            category: required("Category")?,
            description: find("Description"),
            note: find("Note"),
        })
    }

    /// The record's values rearranged into [`HEADER`] order
    fn raw_fields(&self, record: &StringRecord) -> Vec<String> {
        let get = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        vec![
            get(Some(self.date)),
            get(Some(self.amount)),
            get(Some(self.category)),
            get(self.description),
            get(self.note),
        ]
    }
}

fn field<'r>(record: &'r StringRecord, index: usize) -> Option<&'r str> {
    record.get(index).map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD`, ignoring a trailing time part
fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split([' ', 'T']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

fn parse_record(record: &StringRecord, columns: &ColumnMapping) -> Result<TransactionEntry, String> {
    let date = field(record, columns.date).ok_or("missing date")?;
    let date = parse_row_date(date).ok_or_else(|| format!("invalid date '{}'", date))?;

    let amount = field(record, columns.amount).ok_or("missing amount")?;
    let amount = Money::parse_rounded(amount).map_err(|e| format!("bad amount: {}", e))?;

    let category = field(record, columns.category).ok_or("missing category")?;
    let category = Category::from_label(category);

    let mut entry = TransactionEntry::new(amount, category, date);
    if let Some(description) = columns.description.and_then(|i| field(record, i)) {
        entry = entry.with_description(description);
    }
    if let Some(note) = columns.note.and_then(|i| field(record, i)) {
        entry = entry.with_note(note);
    }
    Ok(entry)
}

/// Read entries from CSV, skipping rows that fail validation
///
/// # Errors
///
/// Fails on I/O errors and on a header without the Date, Amount and
/// Category columns. An empty input yields no entries.
pub fn read_entries<R: Read>(source: R) -> TrackerResult<LoadedEntries> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Ok(LoadedEntries::default());
    }
    let columns = ColumnMapping::from_headers(&headers)?;

    let mut loaded = LoadedEntries::default();
    for (idx, result) in reader.byte_records().enumerate() {
        let row = idx + 1;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                loaded.skipped.push(RowError {
                    row,
                    reason: format!("unreadable row: {}", e),
                    fields: Vec::new(),
                });
                continue;
            }
        };
        let record = decode_lossy(raw);

        // Blank lines are not rows
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        match parse_record(&record, &columns) {
            Ok(entry) => loaded.entries.push(entry),
            Err(reason) => loaded.skipped.push(RowError {
                row,
                reason,
                fields: columns.raw_fields(&record),
            }),
        }
    }

    Ok(loaded)
}

/// Invalid UTF-8 is replaced rather than failing the row
fn decode_lossy(raw: ByteRecord) -> StringRecord {
    match StringRecord::from_byte_record(raw) {
        Ok(record) => record,
        Err(e) => e
            .into_byte_record()
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect(),
    }
}

/// Write entries as CSV with the standard header
pub fn write_entries<W: Write>(sink: W, entries: &[TransactionEntry]) -> TrackerResult<()> {
    write_file(sink, entries, &[])
}

/// Write entries followed by the raw fields of rows that could not be loaded
pub fn write_file<W: Write>(
    sink: W,
    entries: &[TransactionEntry],
    retained: &[RowError],
) -> TrackerResult<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);
    writer.write_record(HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.date().format(DATE_FORMAT).to_string().as_str(),
            entry.amount().to_string().as_str(),
            entry.category().name(),
            entry.description(),
            entry.note().unwrap_or(""),
        ])?;
    }

    for row in retained.iter().filter(|r| !r.fields.is_empty()) {
        writer.write_record(&row.fields)?;
    }

    writer.flush()?;
    Ok(())
}
