//! Account Domain - Transactional bank ledger
//!
//! This crate implements the account-mutation protocol for a small bank
//! ledger: opening, renaming, closing, depositing into, withdrawing from, and
//! viewing accounts.
//!
//! # Consistency model
//!
//! The [`Ledger`] holds no locks and no shared mutable state. Each operation
//! runs inside one serializable transaction obtained from an
//! [`AccountStore`]; two concurrent withdrawals that would jointly overdraw
//! an account are resolved by the store aborting one of them, which the
//! ledger reports as a retryable storage failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_account::Ledger;
//!
//! let ledger = Ledger::new(store, Arc::new(SystemClock));
//! let account = ledger.open_account("Frank the Cat").await?;
//! let account = ledger.deposit(account.id().unwrap(), "$10.00".parse()?).await?;
//! ```

pub mod account;
pub mod ports;
pub mod ledger;
pub mod error;

pub use account::{Account, validate_full_name, parse_closed_at};
pub use ports::{AccountStore, AccountTransaction};
pub use ledger::Ledger;
pub use error::{AccountError, LedgerError, ErrorKind};
