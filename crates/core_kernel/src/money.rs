//! Money type with exact integer-cents arithmetic
//!
//! This module provides a type-safe representation of US dollar amounts.
//! The authoritative value is always a whole number of cents held in a signed
//! 32-bit integer; every operation that can leave that range is checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CENTS_PER_DOLLAR: i64 = 100;

/// Errors that can occur during money operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("the supplied value {cents} was outside the allowed range [{}, {}]", Money::MIN_CENTS, Money::MAX_CENTS)]
    OutOfRange { cents: i64 },

    #[error("cannot parse {input:?} as USD: {reason}")]
    Parse { input: String, reason: String },
}

impl MoneyError {
    fn parse(input: &str, reason: impl Into<String>) -> Self {
        MoneyError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A quantity of United States dollars
///
/// Stored as integer cents. There are no comparison or arithmetic
/// impls against bare integers, so mixing money with plain numbers does not
/// compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    total_cents: i32,
}

impl Money {
    /// Smallest representable amount, in cents
    pub const MIN_CENTS: i64 = i32::MIN as i64;

    /// Largest representable amount, in cents
    pub const MAX_CENTS: i64 = i32::MAX as i64;

    /// Zero dollars
    pub const ZERO: Money = Money { total_cents: 0 };

    /// Creates Money from a number of cents
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::OutOfRange` when `cents` falls outside
    /// `[MIN_CENTS, MAX_CENTS]`.
    pub fn new(cents: i64) -> Result<Self, MoneyError> {
        i32::try_from(cents)
            .map(Self::from_cents)
            .map_err(|_| MoneyError::OutOfRange { cents })
    }

    /// Creates Money from cents already known to be in range
    pub const fn from_cents(cents: i32) -> Self {
        Self { total_cents: cents }
    }

    /// Returns the exact amount in cents
    pub fn total_cents(&self) -> i32 {
        self.total_cents
    }

    /// Whole-dollar part, carrying the sign of the amount
    pub fn dollars(&self) -> i64 {
        i64::from(self.total_cents) / CENTS_PER_DOLLAR
    }

    /// Cent part (0..=99 in magnitude), carrying the sign of the amount
    pub fn cents(&self) -> i64 {
        i64::from(self.total_cents) % CENTS_PER_DOLLAR
    }

    pub fn is_zero(&self) -> bool {
        self.total_cents == 0
    }

    pub fn is_positive(&self) -> bool {
        self.total_cents > 0
    }

    pub fn is_negative(&self) -> bool {
        self.total_cents < 0
    }

    /// Checked addition; fails when the sum leaves the representable range
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        Money::new(i64::from(self.total_cents) + i64::from(other.total_cents))
    }

    /// Checked subtraction; fails when the difference leaves the representable range
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        Money::new(i64::from(self.total_cents) - i64::from(other.total_cents))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl TryFrom<i64> for Money {
    type Error = MoneyError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Money::new(cents)
    }
}

impl From<Money> for i32 {
    fn from(money: Money) -> i32 {
        money.total_cents
    }
}

/// Renders the canonical form, e.g. `$12,345,678.90` or `$-0.05`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "${}{}.{:02}",
            sign,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents().unsigned_abs()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parses text such as `$1,234.56`, `1234.56`, ` $-0.05 `
///
/// Exactly two fractional digits are required. Commas, when present, must
/// separate complete groups of three digits.
impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let text = text.strip_prefix('$').unwrap_or(text);
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = text
            .split_once('.')
            .ok_or_else(|| MoneyError::parse(input, "missing decimal point"))?;

        if fraction.len() != 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::parse(input, "expected exactly two fractional digits"));
        }

        let dollars = parse_whole_dollars(input, whole)?;
        let cents = fraction
            .bytes()
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));

        let magnitude = dollars
            .checked_mul(CENTS_PER_DOLLAR)
            .and_then(|d| d.checked_add(cents));

        match magnitude {
            Some(m) => Money::new(if negative { -m } else { m }),
            None => Err(MoneyError::OutOfRange {
                cents: if negative { i64::MIN } else { i64::MAX },
            }),
        }
    }
}

fn parse_whole_dollars(input: &str, whole: &str) -> Result<i64, MoneyError> {
    if whole.is_empty() {
        return Err(MoneyError::parse(input, "missing whole-dollar digits"));
    }

    let groups: Vec<&str> = whole.split(',').collect();
    if groups.len() > 1 {
        let (first, rest) = groups.split_at(1);
        if first[0].is_empty() || first[0].len() > 3 || rest.iter().any(|g| g.len() != 3) {
            return Err(MoneyError::parse(input, "misplaced thousands separator"));
        }
    }

    let mut dollars: i64 = 0;
    for group in groups {
        for b in group.bytes() {
            if !b.is_ascii_digit() {
                return Err(MoneyError::parse(input, "unexpected character"));
            }
            dollars = match dollars
                .checked_mul(10)
                .and_then(|d| d.checked_add(i64::from(b - b'0')))
            {
                Some(d) => d,
                // keep consuming so later syntax errors still win
                None => i64::MAX / CENTS_PER_DOLLAR + 1,
            };
        }
    }
    Ok(dollars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_value_parts() {
        let m = Money::from_cents(1234);
        assert_eq!(m.total_cents(), 1234);
        assert_eq!(m.dollars(), 12);
        assert_eq!(m.cents(), 34);
        assert_eq!(m.to_string(), "$12.34");
    }

    #[test]
    fn test_negative_value_parts() {
        let m = Money::from_cents(-1234);
        assert_eq!(m.dollars(), -12);
        assert_eq!(m.cents(), -34);
        assert_eq!(m.to_string(), "$-12.34");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345678), "12,345,678");
    }

    #[test]
    fn test_bounds() {
        assert!(Money::new(Money::MAX_CENTS).is_ok());
        assert!(Money::new(Money::MIN_CENTS).is_ok());
        assert_eq!(
            Money::new(Money::MAX_CENTS + 1),
            Err(MoneyError::OutOfRange { cents: Money::MAX_CENTS + 1 })
        );
    }

    #[test]
    fn test_min_formats_without_overflow() {
        let m = Money::new(Money::MIN_CENTS).unwrap();
        assert_eq!(m.to_string(), "$-21,474,836.48");
    }
}
