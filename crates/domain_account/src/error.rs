//! Account domain errors

use thiserror::Error;

use core_kernel::{AccountId, Money, MoneyError, PortError};

/// Validation failures raised while constructing an `Account`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("full_name must contain non-whitespace characters")]
    InvalidName,

    #[error("closed_at must carry an explicit UTC offset: {0}")]
    InvalidTimestamp(String),
}

/// Broad category of a ledger failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input, detected before anything is written
    Validation,
    /// The request conflicts with the live state of the account
    DomainRule,
    /// The store failed or refused the transaction
    Storage,
}

/// Errors returned by the `Ledger`
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    #[error("account {0} is closed")]
    AccountClosed(AccountId),

    #[error("account {id} cannot be closed with a balance of {balance}")]
    NonZeroBalance { id: AccountId, balance: Money },

    #[error("account {id} balance {balance} is less than the requested {requested}")]
    InsufficientFunds {
        id: AccountId,
        balance: Money,
        requested: Money,
    },

    #[error("storage failure: {0}")]
    Storage(#[from] PortError),

    /// Rolling back after `original` failed as well
    #[error("rollback failed ({rollback}) after: {original}")]
    RollbackFailed {
        original: Box<LedgerError>,
        #[source]
        rollback: PortError,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Account(_) | LedgerError::Money(_) => ErrorKind::Validation,
            LedgerError::AccountNotFound(_)
            | LedgerError::AccountClosed(_)
            | LedgerError::NonZeroBalance { .. }
            | LedgerError::InsufficientFunds { .. } => ErrorKind::DomainRule,
            LedgerError::Storage(_) | LedgerError::RollbackFailed { .. } => ErrorKind::Storage,
        }
    }

    /// True when re-running the same call may succeed, e.g. after losing a
    /// serialization race to a concurrent transaction
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    pub fn is_serialization_failure(&self) -> bool {
        matches!(self, LedgerError::Storage(e) if e.is_serialization_failure())
    }

    /// True when the transaction lost a race with a concurrent writer, either
    /// reported by the store or detected by a write that matched no rows
    pub fn is_transaction_conflict(&self) -> bool {
        matches!(
            self,
            LedgerError::Storage(e) if e.is_serialization_failure() || matches!(e, PortError::Conflict { .. })
        )
    }
}
