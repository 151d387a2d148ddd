//! Pre-built Test Fixtures
//!
//! Ready-to-use values for ledger tests. These fixtures are consistent and
//! predictable so assertions can compare against them directly.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{FixedClock, Money};
use domain_account::Ledger;

use crate::memory::InMemoryAccountStore;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn one_dollar() -> Money {
        Money::from_cents(1_00)
    }

    pub fn one_cent() -> Money {
        Money::from_cents(1)
    }

    pub fn usd_100() -> Money {
        Money::from_cents(100_00)
    }

    pub fn max() -> Money {
        Money::from_cents(i32::MAX)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The instant every `FixedClock` fixture reports (2024-01-01 12:00 UTC)
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("fixture instant is unambiguous"))
    }

    pub fn fixed_clock() -> FixedClock {
        FixedClock::new(Self::now())
    }
}

/// Common account holder names
pub struct NameFixtures;

impl NameFixtures {
    pub const FRANK: &'static str = "Frank the Cat";
    pub const FRANK_RENAMED: &'static str = "Frank the AMAZING Cat";
    pub const BLANK: &'static str = " \t\n";
}

/// A ledger over a fresh in-memory store with the fixture clock
pub struct LedgerFixture {
    pub ledger: Ledger,
    pub store: InMemoryAccountStore,
}

impl LedgerFixture {
    pub fn new() -> Self {
        Self::with_store(InMemoryAccountStore::new())
    }

    pub fn with_store(store: InMemoryAccountStore) -> Self {
        let ledger = Ledger::new(
            Arc::new(store.clone()),
            Arc::new(TemporalFixtures::fixed_clock()),
        );
        Self { ledger, store }
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}
