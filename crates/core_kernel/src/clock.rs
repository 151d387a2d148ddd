//! Time source abstraction
//!
//! Domain services never read ambient time directly; they are handed a
//! `Clock` so tests can pin "now" to a known instant.

use chrono::{DateTime, Utc};

/// Supplies the current absolute instant
pub trait Clock: Send + Sync {
    /// Returns the current time in UTC
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn utc_now(&self) -> DateTime<Utc> {
        self.instant
    }
}
