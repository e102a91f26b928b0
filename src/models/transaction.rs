//! Transaction entry model and input validation
//!
//! A `TransactionEntry` is immutable once built. Raw form values go through
//! [`validate_entry`], which is the only way user input becomes an entry.

use chrono::NaiveDate;
use std::fmt;

use super::category::Category;
use super::money::{Money, MoneyParseError};
use crate::error::ValidationError;

/// Date format used in the transaction file and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    amount: Money,
    category: Category,
    description: String,
    note: Option<String>,
    date: NaiveDate,
}

impl TransactionEntry {
    /// Create an entry with an empty description and no note
    pub fn new(amount: Money, category: Category, date: NaiveDate) -> Self {
        Self {
            amount,
            category,
            description: String::new(),
            note: None,
            date,
        }
    }

    /// Set the description, without surrounding whitespace
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Set the note; a blank note is stored as no note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        let note = note.trim();
        self.note = if note.is_empty() { None } else { Some(note.to_string()) };
        self
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for TransactionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.category,
            self.amount
        )?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}

/// Raw field values as typed by the user
///
/// `None` and whitespace-only strings both mean "not entered".
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub amount: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
}

impl EntryInput {
    /// Create an input with the required fields filled
    pub fn new(amount: impl Into<String>, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            amount: Some(amount.into()),
            category: Some(category.into()),
            date: Some(date.into()),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn entered(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a positive amount with at most two decimal places
pub fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let amount = Money::parse(raw).map_err(|e| match e {
        MoneyParseError::InvalidFormat(s) => ValidationError::InvalidAmount(s),
        MoneyParseError::TooManyDecimals(s) => ValidationError::TooManyDecimals(s),
        MoneyParseError::OutOfRange(s) => ValidationError::AmountTooLarge(s),
    })?;
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}

/// Turn raw field values into an entry, or report the first bad field
///
/// Fields are checked in form order: amount, category, date.
pub fn validate_entry(input: &EntryInput) -> Result<TransactionEntry, ValidationError> {
    let amount = entered(&input.amount).ok_or(ValidationError::MissingAmount)?;
    let amount = parse_amount(amount)?;

    let category = entered(&input.category).ok_or(ValidationError::MissingCategory)?;
    let category: Category = category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;

    let date = entered(&input.date).ok_or(ValidationError::MissingDate)?;
    let date = parse_date(date)?;

    let mut entry = TransactionEntry::new(amount, category, date);
    if let Some(description) = entered(&input.description) {
        entry = entry.with_description(description);
    }
    if let Some(note) = entered(&input.note) {
        entry = entry.with_note(note);
    }
    Ok(entry)
}
