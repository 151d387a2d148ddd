//! In-memory account store
//!
//! A test double for `AccountStore` with serializable semantics. Each
//! transaction buffers its writes and remembers the version of every row it
//! touched; commit fails with `PortError::SerializationFailure` if any of
//! those rows was committed by someone else in the meantime
//! (first committer wins).
//!
//! Besides the port itself it exposes counters (statements written,
//! transactions still open) and one-shot fault injection so tests can check
//! the ledger's rollback behaviour.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Barrier;

use core_kernel::{
    AccountId, AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, Money, PortError,
};
use domain_account::{Account, AccountStore, AccountTransaction};

#[derive(Debug)]
struct StoredRow {
    account: Account,
    version: u64,
}

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<i64, StoredRow>,
    last_id: i64,
    open_transactions: usize,
    writes_issued: u64,
    commits: u64,
    rollbacks: u64,
}

#[derive(Debug, Default)]
struct Faults {
    begin: Option<PortError>,
    commit: Option<PortError>,
    rollback: Option<PortError>,
    zero_rows_on_balance_update: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    faults: Mutex<Faults>,
    commit_barrier: Option<Barrier>,
    unhealthy: AtomicBool,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn faults(&self) -> MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared, cloneable in-memory store; clones see the same rows
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    shared: Arc<Shared>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every commit wait until `parties` transactions are committing
    ///
    /// Forces concurrent ledger calls to overlap: all of them read before
    /// any of them commits.
    pub fn with_commit_barrier(parties: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                commit_barrier: Some(Barrier::new(parties)),
                ..Shared::default()
            }),
        }
    }

    /// Inserts a committed row directly, bypassing transactions and counters
    pub fn seed(&self, full_name: &str, balance: Money, closed_at: Option<DateTime<Utc>>) -> AccountId {
        let mut state = self.shared.state();
        state.last_id += 1;
        let id = AccountId::new(state.last_id);
        let account = Account::rehydrate(Some(id), full_name, balance, closed_at)
            .unwrap_or_else(|e| panic!("invalid seed account: {e}"));
        state.rows.insert(id.value(), StoredRow { account, version: 1 });
        id
    }

    /// Committed state of one row, read outside any transaction
    pub fn snapshot(&self, id: AccountId) -> Option<Account> {
        self.shared.state().rows.get(&id.value()).map(|row| row.account.clone())
    }

    /// Number of write statements (insert/update) issued, committed or not
    pub fn writes_issued(&self) -> u64 {
        self.shared.state().writes_issued
    }

    /// Transactions begun but not yet committed, rolled back, or dropped
    pub fn open_transactions(&self) -> usize {
        self.shared.state().open_transactions
    }

    pub fn commits(&self) -> u64 {
        self.shared.state().commits
    }

    pub fn rollbacks(&self) -> u64 {
        self.shared.state().rollbacks
    }

    /// The next `begin_serializable` fails with `error`
    pub fn fail_next_begin(&self, error: PortError) {
        self.shared.faults().begin = Some(error);
    }

    /// The next commit fails with `error` and applies nothing
    pub fn fail_next_commit(&self, error: PortError) {
        self.shared.faults().commit = Some(error);
    }

    /// The next rollback fails with `error` (its writes are still discarded)
    pub fn fail_next_rollback(&self, error: PortError) {
        self.shared.faults().rollback = Some(error);
    }

    /// The next `update_balance` reports zero affected rows, as if a
    /// concurrent writer had changed the row first
    pub fn lose_next_balance_update(&self) {
        self.shared.faults().zero_rows_on_balance_update = true;
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.shared.unhealthy.store(!healthy, Ordering::SeqCst);
    }
}

impl DomainPort for InMemoryAccountStore {}

#[async_trait]
impl HealthCheckable for InMemoryAccountStore {
    async fn health_check(&self) -> HealthCheckResult {
        let unhealthy = self.shared.unhealthy.load(Ordering::SeqCst);
        HealthCheckResult {
            adapter_id: "in-memory-account-store".to_string(),
            status: if unhealthy { AdapterHealth::Unhealthy } else { AdapterHealth::Healthy },
            latency_ms: 0,
            message: unhealthy.then(|| "marked unhealthy".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn begin_serializable(&self) -> Result<Box<dyn AccountTransaction>, PortError> {
        if let Some(error) = self.shared.faults().begin.take() {
            return Err(error);
        }
        self.shared.state().open_transactions += 1;
        Ok(Box::new(InMemoryTransaction {
            shared: Arc::clone(&self.shared),
            read_versions: HashMap::new(),
            pending: BTreeMap::new(),
            finished: false,
        }))
    }
}

/// One transaction against an `InMemoryAccountStore`
#[derive(Debug)]
pub struct InMemoryTransaction {
    shared: Arc<Shared>,
    /// Version of each row when first seen; `None` if it did not exist
    read_versions: HashMap<i64, Option<u64>>,
    /// Buffered post-write images, keyed by id
    pending: BTreeMap<i64, Account>,
    finished: bool,
}

impl InMemoryTransaction {
    fn ensure_active(&self) -> Result<(), PortError> {
        if self.finished {
            return Err(PortError::internal("transaction already finished"));
        }
        Ok(())
    }

    /// This transaction's view of a row: its own pending write, else committed state
    fn view(&mut self, id: AccountId) -> Option<Account> {
        if let Some(account) = self.pending.get(&id.value()) {
            return Some(account.clone());
        }
        let state = self.shared.state();
        let row = state.rows.get(&id.value());
        self.read_versions
            .entry(id.value())
            .or_insert_with(|| row.map(|r| r.version));
        row.map(|r| r.account.clone())
    }

    fn write(&mut self, account: Account) -> Result<(), PortError> {
        let id = account
            .id()
            .ok_or_else(|| PortError::internal("pending write without an id"))?;
        self.shared.state().writes_issued += 1;
        self.pending.insert(id.value(), account);
        Ok(())
    }

    fn release(&mut self) {
        if !self.finished {
            self.finished = true;
            let mut state = self.shared.state();
            state.open_transactions = state.open_transactions.saturating_sub(1);
        }
    }
}

fn rebuild(
    account: &Account,
    full_name: &str,
    balance: Money,
    closed_at: Option<DateTime<Utc>>,
) -> Result<Account, PortError> {
    Account::rehydrate(account.id(), full_name, balance, closed_at)
        .map_err(|e| PortError::transformation(e.to_string()))
}

#[async_trait]
impl AccountTransaction for InMemoryTransaction {
    async fn select_by_id(&mut self, id: AccountId) -> Result<Option<Account>, PortError> {
        self.ensure_active()?;
        Ok(self.view(id))
    }

    async fn insert(&mut self, account: &Account) -> Result<Account, PortError> {
        self.ensure_active()?;
        if let Some(id) = account.id() {
            return Err(PortError::already_persisted("Account", id));
        }
        let id = {
            let mut state = self.shared.state();
            state.last_id += 1;
            AccountId::new(state.last_id)
        };
        let inserted = Account::rehydrate(
            Some(id),
            account.full_name(),
            account.balance(),
            account.closed_at(),
        )
        .map_err(|e| PortError::transformation(e.to_string()))?;
        self.write(inserted.clone())?;
        Ok(inserted)
    }

    async fn update_name(&mut self, id: AccountId, full_name: &str) -> Result<(), PortError> {
        self.ensure_active()?;
        if let Some(current) = self.view(id) {
            let updated = rebuild(&current, full_name, current.balance(), current.closed_at())?;
            self.write(updated)?;
        }
        Ok(())
    }

    async fn update_balance(&mut self, id: AccountId, balance: Money) -> Result<u64, PortError> {
        self.ensure_active()?;
        let lost = std::mem::take(&mut self.shared.faults().zero_rows_on_balance_update);
        match self.view(id) {
            Some(current) if !lost => {
                let updated = rebuild(&current, current.full_name(), balance, current.closed_at())?;
                self.write(updated)?;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn update_closed_at(
        &mut self,
        id: AccountId,
        closed_at: DateTime<Utc>,
    ) -> Result<(), PortError> {
        self.ensure_active()?;
        if let Some(current) = self.view(id) {
            let updated = rebuild(&current, current.full_name(), current.balance(), Some(closed_at))?;
            self.write(updated)?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), PortError> {
        self.ensure_active()?;

        if let Some(barrier) = &self.shared.commit_barrier {
            barrier.wait().await;
        }

        let fault = self.shared.faults().commit.take();
        if let Some(error) = fault {
            self.release();
            return Err(error);
        }

        let outcome = {
            let mut state = self.shared.state();
            let stale = self.read_versions.iter().find(|(id, seen)| {
                state.rows.get(*id).map(|row| row.version) != **seen
            });

            if let Some((id, _)) = stale {
                Err(PortError::serialization_failure(format!(
                    "could not serialize access due to concurrent update of account {id}"
                )))
            } else {
                for (id, account) in std::mem::take(&mut self.pending) {
                    let version = state.rows.get(&id).map_or(1, |row| row.version + 1);
                    state.rows.insert(id, StoredRow { account, version });
                }
                state.commits += 1;
                Ok(())
            }
        };

        self.release();
        outcome
    }

    async fn rollback(&mut self) -> Result<(), PortError> {
        if self.finished {
            return Ok(());
        }
        self.pending.clear();
        self.release();
        self.shared.state().rollbacks += 1;

        match self.shared.faults().rollback.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        self.release();
    }
}
