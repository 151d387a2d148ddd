//! Test Data Builders
//!
//! Builder patterns for constructing account snapshots and seeded store rows
//! with sensible defaults, so tests only spell out the fields they care about.

use chrono::{DateTime, Utc};
use core_kernel::{AccountId, Money};
use domain_account::Account;

use crate::fixtures::NameFixtures;
use crate::memory::InMemoryAccountStore;

/// Builder for account snapshots and seeded rows
#[derive(Debug, Clone)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    full_name: String,
    balance: Money,
    closed_at: Option<DateTime<Utc>>,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    /// An open, unsaved account named after the standard fixture with $0.00
    pub fn new() -> Self {
        Self {
            id: None,
            full_name: NameFixtures::FRANK.to_string(),
            balance: Money::ZERO,
            closed_at: None,
        }
    }

    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_balance_cents(mut self, cents: i32) -> Self {
        self.balance = Money::from_cents(cents);
        self
    }

    pub fn closed_at(mut self, at: DateTime<Utc>) -> Self {
        self.closed_at = Some(at);
        self
    }

    /// Builds the snapshot
    ///
    /// # Panics
    ///
    /// Panics if the configured name is invalid
    pub fn build(self) -> Account {
        Account::rehydrate(self.id, self.full_name, self.balance, self.closed_at)
            .unwrap_or_else(|e| panic!("AccountBuilder produced an invalid account: {e}"))
    }

    /// Writes the account straight into `store` as committed state
    pub fn seed(self, store: &InMemoryAccountStore) -> AccountId {
        store.seed(&self.full_name, self.balance, self.closed_at)
    }
}
