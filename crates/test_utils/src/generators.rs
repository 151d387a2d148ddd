//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::Money;
use proptest::prelude::*;

/// Any representable amount, negative values included
pub fn money_strategy() -> impl Strategy<Value = Money> {
    any::<i32>().prop_map(Money::from_cents)
}

/// Strictly positive amounts up to $10,000,000.00
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i32..1_000_000_000i32).prop_map(Money::from_cents)
}

/// Names with at least one visible character
pub fn valid_name_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z][A-Za-z .'-]{0,30}"
}

/// Names made only of whitespace (including the empty string)
pub fn blank_name_strategy() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,8}"
}
