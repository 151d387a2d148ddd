//! The ledger service
//!
//! Every public operation follows the same transactional
//! read-validate-write protocol:
//!
//! 1. begin a serializable transaction
//! 2. read the current snapshot (`AccountNotFound` if absent)
//! 3. check the operation's preconditions against that snapshot
//! 4. write, then re-read the authoritative post-write snapshot
//! 5. commit
//!
//! Any failure in steps 1-5 rolls the transaction back and is returned
//! unchanged. The transaction is always committed or rolled back before the
//! call returns; concurrency control is left entirely to the store.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use core_kernel::{AccountId, Clock, Money, PortError};

use crate::account::{validate_full_name, Account};
use crate::error::LedgerError;
use crate::ports::{AccountStore, AccountTransaction};

/// Caller-facing account operations
///
/// Cheap to clone; holds no state besides its two collaborators.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Creates a ledger over the given store, stamping closures with `clock`
    pub fn new(store: Arc<dyn AccountStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the backing store (used for health checks)
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Opens a new account with a zero balance
    #[instrument(skip(self))]
    pub async fn open_account(&self, full_name: &str) -> Result<Account, LedgerError> {
        let account = Account::new(full_name)?;

        let mut tx = self.store.begin_serializable().await?;
        let result = insert_new(tx.as_mut(), &account).await;
        let opened = finish(tx, result).await?;

        info!(account = %opened, "account opened");
        Ok(opened)
    }

    /// Loads the current snapshot of an account
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn load(&self, id: AccountId) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin_serializable().await?;
        let result = select_existing(tx.as_mut(), id).await;
        finish(tx, result).await
    }

    /// Changes the name on an open account
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn rename(&self, id: AccountId, full_name: &str) -> Result<Account, LedgerError> {
        validate_full_name(full_name)?;

        let mut tx = self.store.begin_serializable().await?;
        let result = rename_in(tx.as_mut(), id, full_name).await;
        let renamed = finish(tx, result).await?;

        info!(account = %renamed, "account renamed");
        Ok(renamed)
    }

    /// Closes an account whose balance is zero
    ///
    /// Closing an account that is already closed writes nothing and returns
    /// the existing snapshot.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn close(&self, id: AccountId) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin_serializable().await?;
        let result = close_in(tx.as_mut(), id, self.clock.as_ref()).await;
        let closed = finish(tx, result).await?;

        info!(account = %closed, "account closed");
        Ok(closed)
    }

    /// Adds `amount` to an open account's balance
    #[instrument(skip(self), fields(account_id = %id, amount = %amount))]
    pub async fn deposit(&self, id: AccountId, amount: Money) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin_serializable().await?;
        let result = deposit_in(tx.as_mut(), id, amount).await;
        let after = finish(tx, result).await?;

        info!(balance = %after.balance(), "deposit committed");
        Ok(after)
    }

    /// Removes `amount` from an open account that holds at least that much
    #[instrument(skip(self), fields(account_id = %id, amount = %amount))]
    pub async fn withdraw(&self, id: AccountId, amount: Money) -> Result<Account, LedgerError> {
        let mut tx = self.store.begin_serializable().await?;
        let result = withdraw_in(tx.as_mut(), id, amount).await;
        let after = finish(tx, result).await?;

        info!(balance = %after.balance(), "withdrawal committed");
        Ok(after)
    }
}

/// Commits on success, rolls back on any failure (including a failed commit)
async fn finish<T>(
    mut tx: Box<dyn AccountTransaction>,
    result: Result<T, LedgerError>,
) -> Result<T, LedgerError> {
    let failure = match result {
        Ok(value) => match tx.commit().await {
            Ok(()) => {
                debug!("transaction committed");
                return Ok(value);
            }
            Err(e) => LedgerError::Storage(e),
        },
        Err(e) => e,
    };

    match tx.rollback().await {
        Ok(()) => {
            warn!(error = %failure, "transaction rolled back");
            Err(failure)
        }
        Err(rollback) => {
            error!(error = %failure, rollback_error = %rollback, "rollback failed");
            Err(LedgerError::RollbackFailed {
                original: Box::new(failure),
                rollback,
            })
        }
    }
}

async fn select_existing(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
) -> Result<Account, LedgerError> {
    tx.select_by_id(id)
        .await?
        .ok_or(LedgerError::AccountNotFound(id))
}

async fn select_open(tx: &mut dyn AccountTransaction, id: AccountId) -> Result<Account, LedgerError> {
    let account = select_existing(tx, id).await?;
    if !account.is_open() {
        return Err(LedgerError::AccountClosed(id));
    }
    Ok(account)
}

async fn insert_new(tx: &mut dyn AccountTransaction, account: &Account) -> Result<Account, LedgerError> {
    let inserted = tx.insert(account).await?;
    let id = inserted
        .id()
        .ok_or_else(|| PortError::internal("insert returned an account without an id"))?;
    select_existing(tx, id).await
}

async fn rename_in(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
    full_name: &str,
) -> Result<Account, LedgerError> {
    select_open(tx, id).await?;
    tx.update_name(id, full_name).await?;
    select_existing(tx, id).await
}

async fn close_in(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
    clock: &dyn Clock,
) -> Result<Account, LedgerError> {
    let account = select_existing(tx, id).await?;
    if !account.is_open() {
        debug!("account already closed; nothing to write");
        return Ok(account);
    }
    if !account.balance().is_zero() {
        return Err(LedgerError::NonZeroBalance {
            id,
            balance: account.balance(),
        });
    }

    tx.update_closed_at(id, clock.utc_now()).await?;
    select_existing(tx, id).await
}

async fn deposit_in(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
    amount: Money,
) -> Result<Account, LedgerError> {
    let before = select_open(tx, id).await?;
    let balance = before.balance().checked_add(&amount)?;
    write_balance(tx, id, balance).await?;
    select_existing(tx, id).await
}

async fn withdraw_in(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
    amount: Money,
) -> Result<Account, LedgerError> {
    let before = select_open(tx, id).await?;
    if before.balance() < amount {
        return Err(LedgerError::InsufficientFunds {
            id,
            balance: before.balance(),
            requested: amount,
        });
    }
    let balance = before.balance().checked_sub(&amount)?;
    write_balance(tx, id, balance).await?;
    select_existing(tx, id).await
}

async fn write_balance(
    tx: &mut dyn AccountTransaction,
    id: AccountId,
    balance: Money,
) -> Result<(), LedgerError> {
    let updated = tx.update_balance(id, balance).await?;
    if updated == 0 {
        return Err(PortError::conflict(format!("account {id} changed during the transaction")).into());
    }
    debug!(rows = updated, %balance, "balance written");
    Ok(())
}
