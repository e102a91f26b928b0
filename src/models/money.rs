//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Parsed amounts are bounded and arithmetic saturates, so totals
//! never wrap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Lossy conversion for chart scaling
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Largest magnitude accepted by [`Money::parse`], in cents
    ///
    /// Keeps sums of many entries far away from `i64` overflow.
    pub const MAX_ABS_CENTS: i64 = 100_000_000_000_000;

    /// Parse a money amount from a decimal string
    ///
    /// Accepts "10.50", "-10.50", "+3", "10", "10.5" and ".75". More than two
    /// fractional digits are rejected unless the extra digits are zeros.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        parse_decimal(s, false)
    }

    /// Parse like [`Money::parse`], rounding extra fractional digits half
    /// away from zero instead of rejecting them
    pub fn parse_rounded(s: &str) -> Result<Self, MoneyParseError> {
        parse_decimal(s, true)
    }

    /// Format with a currency label and thousands separators, e.g. "BDT 1,234.50"
    pub fn format_with_label(&self, label: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let grouped = group_thousands(self.units().unsigned_abs());
        if label.is_empty() {
            format!("{}{}.{:02}", sign, grouped, self.cents_part())
        } else {
            format!("{}{} {}.{:02}", sign, label, grouped, self.cents_part())
        }
    }
}

fn parse_decimal(s: &str, round: bool) -> Result<Money, MoneyParseError> {
    let trimmed = s.trim();
    let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

    let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };

    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let (kept, extra) = fraction.split_at(fraction.len().min(2));
    let round_up = match extra.chars().next() {
        None => false,
        Some(_) if extra.chars().all(|c| c == '0') => false,
        Some(first) if round => first >= '5',
        Some(_) => return Err(MoneyParseError::TooManyDecimals(trimmed.to_string())),
    };

    let out_of_range = || MoneyParseError::OutOfRange(trimmed.to_string());
    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let cents: i64 = match kept.len() {
        0 => 0,
        1 => kept.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => kept.parse().map_err(|_| invalid())?,
    };

    let total = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(cents + i64::from(round_up)))
        .filter(|total| *total <= Money::MAX_ABS_CENTS)
        .ok_or_else(out_of_range)?;

    Ok(Money(if negative { -total } else { total }))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal form used in the transaction file, e.g. "-10.50"
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),

    #[error("More than two decimal places: {0}")]
    TooManyDecimals(String),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_with_label() {
        assert_eq!(
            Money::from_cents(123_450).format_with_label("BDT"),
            "BDT 1,234.50"
        );
        assert_eq!(
            Money::from_cents(100_000_000).format_with_label("BDT"),
            "BDT 1,000,000.00"
        );
        assert_eq!(Money::from_cents(999).format_with_label(""), "9.99");
        assert_eq!(Money::from_cents(-250).format_with_label("$"), "-$ 2.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("+3").unwrap().cents(), 300);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse(" 30.0 ").unwrap().cents(), 3000);
        assert_eq!(Money::parse("12.3400").unwrap().cents(), 1234);
    }

    #[test]
    fn test_parse_rejects_extra_decimals() {
        assert_eq!(
            Money::parse("12.349"),
            Err(MoneyParseError::TooManyDecimals("12.349".into()))
        );
        assert_eq!(
            Money::parse("0.005"),
            Err(MoneyParseError::TooManyDecimals("0.005".into()))
        );
    }

    #[test]
    fn test_parse_rounded() {
        assert_eq!(Money::parse_rounded("12.349").unwrap().cents(), 1235);
        assert_eq!(Money::parse_rounded("12.344").unwrap().cents(), 1234);
        assert_eq!(Money::parse_rounded("0.005").unwrap().cents(), 1);
        assert_eq!(Money::parse_rounded("-0.995").unwrap().cents(), -100);
        assert_eq!(Money::parse_rounded("0.001").unwrap().cents(), 0);
        assert_eq!(Money::parse_rounded("5").unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            Money::parse("1000000000000").unwrap().cents(),
            Money::MAX_ABS_CENTS
        );
        assert_eq!(
            Money::parse("1000000000000.01"),
            Err(MoneyParseError::OutOfRange("1000000000000.01".into()))
        );
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!((big + Money::from_cents(10)).cents(), i64::MAX);

        let mut total = big;
        total += big;
        assert_eq!(total.cents(), i64::MAX);

        let sum: Money = [big, big, big].iter().sum();
        assert_eq!(sum.cents(), i64::MAX);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "abc", "1.2.3", "12a", "-", ".", "1,000", "1e3", "--5"] {
            assert!(Money::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }
}
