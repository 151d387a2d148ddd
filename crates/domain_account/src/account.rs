//! Account snapshots
//!
//! An `Account` is an immutable read of one account row. Nothing here mutates
//! an account in place; the ledger produces a new snapshot by re-reading
//! storage after every write.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use core_kernel::{AccountId, Money};

use crate::error::AccountError;

/// A single bank account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: Option<AccountId>,
    full_name: String,
    balance: Money,
    closed_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a brand-new, unsaved account: no id, zero balance, open
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidName` when `full_name` is empty or
    /// whitespace only.
    pub fn new(full_name: impl Into<String>) -> Result<Self, AccountError> {
        Self::rehydrate(None, full_name, Money::ZERO, None)
    }

    /// Rebuilds an account from data saved in a store
    ///
    /// Prefer [`Account::new`] for entirely new accounts.
    pub fn rehydrate(
        id: Option<AccountId>,
        full_name: impl Into<String>,
        balance: Money,
        closed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, AccountError> {
        let full_name = full_name.into();
        validate_full_name(&full_name)?;

        Ok(Self {
            id,
            full_name,
            balance,
            closed_at,
        })
    }

    /// `None` when this account does not exist in storage yet
    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map_or_else(|| "None".to_string(), |id| id.to_string());
        let closed_at = self
            .closed_at
            .map_or_else(|| "None".to_string(), |at| format!("{:?}", at.to_rfc3339()));
        write!(
            f,
            "Account(acct_id={}, full_name={:?}, balance={}, closed_at_utc={})",
            id, self.full_name, self.balance, closed_at
        )
    }
}

/// Checks that a name contains at least one non-whitespace character
pub fn validate_full_name(full_name: &str) -> Result<(), AccountError> {
    if full_name.trim().is_empty() {
        return Err(AccountError::InvalidName);
    }
    Ok(())
}

/// Parses an RFC 3339 closing timestamp
///
/// Text without an explicit offset (a naive local time) is rejected, since
/// there is no way to know which instant it names.
pub fn parse_closed_at(text: &str) -> Result<DateTime<Utc>, AccountError> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| AccountError::InvalidTimestamp(format!("{text:?}: {e}")))
}
