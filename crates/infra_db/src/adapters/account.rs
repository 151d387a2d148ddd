//! PostgreSQL Account Adapter
//!
//! The internal (database) adapter for the account domain, implementing the
//! `AccountStore` and `AccountTransaction` ports on top of `AccountRepository`.
//!
//! Every transaction is opened with `SET TRANSACTION ISOLATION LEVEL
//! SERIALIZABLE`. When PostgreSQL aborts one because it lost a race
//! (SQLSTATE 40001 or 40P01) the error surfaces as
//! `PortError::SerializationFailure`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use core_kernel::SystemClock;
//! use domain_account::Ledger;
//! use infra_db::adapters::PostgresAccountStore;
//!
//! let store = PostgresAccountStore::new(pool);
//! let ledger = Ledger::new(Arc::new(store), Arc::new(SystemClock));
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{
    AccountId, AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, Money, PortError,
};
use domain_account::{Account, AccountStore, AccountTransaction};

use crate::error::DatabaseError;
use crate::repositories::account::{AccountRepository, NewAccount};

const ADAPTER_ID: &str = "postgres-account-store";

/// PostgreSQL-backed implementation of `AccountStore`
///
/// # Health Checking
///
/// Health checks run `SELECT 1` on the pool to verify the database is
/// reachable and responsive.
#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresAccountStore {}

#[async_trait]
impl HealthCheckable for PostgresAccountStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[instrument(skip(self))]
    async fn begin_serializable(&self) -> Result<Box<dyn AccountTransaction>, PortError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        AccountRepository::set_serializable(&mut tx).await?;
        debug!("serializable transaction started");

        Ok(Box::new(PostgresAccountTransaction { tx: Some(tx) }))
    }
}

/// One serializable PostgreSQL transaction
///
/// Dropping it without committing rolls it back.
pub struct PostgresAccountTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresAccountTransaction {
    fn active(&mut self) -> Result<&mut Transaction<'static, Postgres>, PortError> {
        self.tx
            .as_mut()
            .ok_or_else(|| PortError::internal("transaction already finished"))
    }
}

#[async_trait]
impl AccountTransaction for PostgresAccountTransaction {
    #[instrument(skip(self), fields(account_id = %id))]
    async fn select_by_id(&mut self, id: AccountId) -> Result<Option<Account>, PortError> {
        let tx = self.active()?;
        let row = AccountRepository::find_by_id(tx, id.value()).await?;
        let account = row.map(Account::try_from).transpose()?;
        Ok(account)
    }

    #[instrument(skip(self, account))]
    async fn insert(&mut self, account: &Account) -> Result<Account, PortError> {
        if let Some(id) = account.id() {
            return Err(PortError::already_persisted("Account", id));
        }
        let tx = self.active()?;
        let row = AccountRepository::insert(tx, NewAccount::from(account)).await?;
        debug!(id = row.id, "account row inserted");
        Ok(Account::try_from(row)?)
    }

    #[instrument(skip(self, full_name), fields(account_id = %id))]
    async fn update_name(&mut self, id: AccountId, full_name: &str) -> Result<(), PortError> {
        let tx = self.active()?;
        AccountRepository::update_name(tx, id.value(), full_name).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(account_id = %id, balance = %balance))]
    async fn update_balance(&mut self, id: AccountId, balance: Money) -> Result<u64, PortError> {
        let tx = self.active()?;
        let rows = AccountRepository::update_balance(tx, id.value(), balance.total_cents()).await?;
        Ok(rows)
    }

    #[instrument(skip(self), fields(account_id = %id))]
    async fn update_closed_at(
        &mut self,
        id: AccountId,
        closed_at: DateTime<Utc>,
    ) -> Result<(), PortError> {
        let tx = self.active()?;
        AccountRepository::update_closed_at(tx, id.value(), closed_at).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), PortError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| PortError::internal("transaction already finished"))?;
        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), PortError> {
        match self.tx.take() {
            Some(tx) => {
                tx.rollback().await.map_err(DatabaseError::from)?;
                Ok(())
            }
            None => Ok(()),
        }
    }
}
