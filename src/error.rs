//! Custom error types for fintrack
//!
//! `ValidationError` covers bad user input for a single transaction and
//! `TrackerError` wraps everything else the library can fail with.

use thiserror::Error;

/// Input validation failures, one variant per offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No amount was given
    #[error("Please enter an amount")]
    MissingAmount,

    /// Amount is not a number
    #[error("Amount is not a valid number: {0}")]
    InvalidAmount(String),

    /// Amount has fractions of a cent
    #[error("Amount has more than two decimal places: {0}")]
    TooManyDecimals(String),

    /// Amount is beyond the supported range
    #[error("Amount is too large: {0}")]
    AmountTooLarge(String),

    /// Amount is zero or negative
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// No category was selected
    #[error("Please select a category")]
    MissingCategory,

    /// Category is not one of the fixed set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// No date was given
    #[error("Please enter a date")]
    MissingDate,

    /// Date is not in YYYY-MM-DD form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl ValidationError {
    /// Name of the input field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingAmount
            | Self::InvalidAmount(_)
            | Self::TooManyDecimals(_)
            | Self::AmountTooLarge(_)
            | Self::NonPositiveAmount => "amount",
            Self::MissingCategory | Self::UnknownCategory(_) => "category",
            Self::MissingDate | Self::InvalidDate(_) => "date",
        }
    }
}

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Reading or writing the transaction file failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A file could not be parsed at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::Io(err.to_string())
        } else {
            Self::Parse(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_validation_error_names_field() {
        assert_eq!(ValidationError::NonPositiveAmount.field(), "amount");
        assert_eq!(ValidationError::InvalidAmount("abc".into()).field(), "amount");
        assert_eq!(ValidationError::MissingCategory.field(), "category");
        assert_eq!(ValidationError::InvalidDate("x".into()).field(), "date");
    }

    #[test]
    fn test_validation_converts_into_tracker_error() {
        let err: TrackerError = ValidationError::MissingCategory.into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Please select a category"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
