//! Spending categories
//!
//! New entries must use one of the fixed categories; the order of declaration
//! is the display order. Labels outside the set can still come from an
//! existing transaction file and are kept as [`Category::Custom`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Other,
    /// Label read from the file that matches none of the fixed categories
    Custom(String),
}

impl Category {
    /// Every fixed category, in display order
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transportation,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    /// Label used in the transaction file and on screen
    pub fn name(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }

    /// Map a stored label to a category, keeping unknown labels as-is
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| Self::Custom(label.trim().to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a label matches no fixed category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match against the fixed category names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .cloned()
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}
