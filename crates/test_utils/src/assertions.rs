//! Custom Test Assertions
//!
//! Assertion helpers for ledger types that give more meaningful failure
//! messages than bare `assert_eq!`.

use core_kernel::{AccountId, Money};
use domain_account::{Account, ErrorKind, LedgerError};

use crate::memory::InMemoryAccountStore;

/// Asserts an account snapshot's balance, in cents
pub fn assert_balance(account: &Account, expected_cents: i32) {
    assert_eq!(
        account.balance(),
        Money::from_cents(expected_cents),
        "Unexpected balance on {}",
        account
    );
}

/// Asserts the committed balance of a row in the store
pub fn assert_stored_balance(store: &InMemoryAccountStore, id: AccountId, expected_cents: i32) {
    let account = store
        .snapshot(id)
        .unwrap_or_else(|| panic!("Expected {id} to exist in the store"));
    assert_balance(&account, expected_cents);
}

/// Asserts that no transaction was left open
pub fn assert_no_open_transactions(store: &InMemoryAccountStore) {
    assert_eq!(
        store.open_transactions(),
        0,
        "Expected every transaction to be committed or rolled back"
    );
}

/// Asserts a ledger failure falls in the given category
pub fn assert_error_kind(error: &LedgerError, expected: ErrorKind) {
    assert_eq!(
        error.kind(),
        expected,
        "Unexpected error category for: {error}"
    );
}
