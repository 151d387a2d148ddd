//! Account Domain Ports
//!
//! This module defines the storage interface the ledger needs, enabling
//! swappable implementations (PostgreSQL, in-memory test double, etc.).
//!
//! # Architecture
//!
//! An `AccountStore` hands out `AccountTransaction`s. Each transaction runs at
//! serializable isolation: reads and writes inside it behave as if all
//! transactions ran one at a time, and the store aborts (at a write or at
//! commit) any transaction it cannot fit into such an order.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut tx = store.begin_serializable().await?;
//! let account = tx.select_by_id(id).await?;
//! tx.update_balance(id, new_balance).await?;
//! tx.commit().await?;
//! ```
//!
//! A transaction that is dropped without `commit` discards its writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{AccountId, DomainPort, HealthCheckable, Money, PortError};

use crate::account::Account;

/// Source of serializable transactions over the account table
#[async_trait]
pub trait AccountStore: DomainPort + HealthCheckable {
    /// Starts a transaction at serializable isolation
    async fn begin_serializable(&self) -> Result<Box<dyn AccountTransaction>, PortError>;
}

/// One open transaction on one logical connection
#[async_trait]
pub trait AccountTransaction: Send {
    /// Selects a single account, or `None` if the id does not exist
    async fn select_by_id(&mut self, id: AccountId) -> Result<Option<Account>, PortError>;

    /// Inserts a row for a never-before-saved account and returns it with its new id
    ///
    /// # Errors
    ///
    /// `PortError::AlreadyPersisted` if `account` already carries an id.
    async fn insert(&mut self, account: &Account) -> Result<Account, PortError>;

    async fn update_name(&mut self, id: AccountId, full_name: &str) -> Result<(), PortError>;

    /// Sets the balance and returns the number of rows changed
    ///
    /// Zero means the row no longer matches, i.e. a concurrent writer won.
    async fn update_balance(&mut self, id: AccountId, balance: Money) -> Result<u64, PortError>;

    async fn update_closed_at(
        &mut self,
        id: AccountId,
        closed_at: DateTime<Utc>,
    ) -> Result<(), PortError>;

    /// Commits every write since the transaction began
    ///
    /// Fails with `PortError::SerializationFailure` when the store cannot
    /// serialize this transaction against concurrent ones.
    async fn commit(&mut self) -> Result<(), PortError>;

    /// Discards every write since the transaction began
    ///
    /// Rolling back a transaction that already finished is a no-op.
    async fn rollback(&mut self) -> Result<(), PortError>;
}
