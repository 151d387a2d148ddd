//! Account repository implementation
//!
//! Statement-level access to the `account` table. Every function runs on a
//! connection the caller supplies (normally a transaction), so the caller
//! decides the isolation level and when to commit.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use core_kernel::{AccountId, Money};
use domain_account::Account;

use crate::error::DatabaseError;

const ACCOUNT_COLUMNS: &str = "id, full_name, balance_usd_cents, closed_at_utc";

/// A row of the `account` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub full_name: String,
    pub balance_usd_cents: i32,
    pub closed_at_utc: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DatabaseError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Account::rehydrate(
            Some(AccountId::new(id)),
            row.full_name,
            Money::from_cents(row.balance_usd_cents),
            row.closed_at_utc,
        )
        .map_err(|e| DatabaseError::InvalidRow(format!("account {}: {}", id, e)))
    }
}

/// Data for inserting a new account row
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub full_name: &'a str,
    pub balance_usd_cents: i32,
    pub closed_at_utc: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Account> for NewAccount<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            full_name: account.full_name(),
            balance_usd_cents: account.balance().total_cents(),
            closed_at_utc: account.closed_at(),
        }
    }
}

/// Repository for the `account` table
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountRepository;

impl AccountRepository {
    /// Raises the isolation level of the current transaction to SERIALIZABLE
    ///
    /// Must run before any other statement in the transaction.
    pub async fn set_serializable(conn: &mut PgConnection) -> Result<(), DatabaseError> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(conn)
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(())
    }

    /// Fetches one account row by id
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<AccountRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    /// Inserts a new row and returns it with its generated id
    pub async fn insert(
        conn: &mut PgConnection,
        account: NewAccount<'_>,
    ) -> Result<AccountRow, DatabaseError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO account (full_name, balance_usd_cents, closed_at_utc)
            VALUES ($1, $2, $3)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.full_name)
        .bind(account.balance_usd_cents)
        .bind(account.closed_at_utc)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// Sets `full_name`; returns the number of rows changed
    pub async fn update_name(
        conn: &mut PgConnection,
        id: i64,
        full_name: &str,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE account SET full_name = $2 WHERE id = $1")
            .bind(id)
            .bind(full_name)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Sets `balance_usd_cents`; returns the number of rows changed
    pub async fn update_balance(
        conn: &mut PgConnection,
        id: i64,
        balance_usd_cents: i32,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE account SET balance_usd_cents = $2 WHERE id = $1")
            .bind(id)
            .bind(balance_usd_cents)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Sets `closed_at_utc`; returns the number of rows changed
    pub async fn update_closed_at(
        conn: &mut PgConnection,
        id: i64,
        closed_at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE account SET closed_at_utc = $2 WHERE id = $1")
            .bind(id)
            .bind(closed_at)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> AccountRow {
        AccountRow {
            id: 42,
            full_name: "Frank".to_string(),
            balance_usd_cents: -1_50,
            closed_at_utc: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
        }
    }

    #[test]
    fn test_row_to_account() {
        let account = Account::try_from(row()).unwrap();

        assert_eq!(account.id(), Some(AccountId::new(42)));
        assert_eq!(account.full_name(), "Frank");
        assert_eq!(account.balance(), Money::from_cents(-150));
        assert!(!account.is_open());
    }

    #[test]
    fn test_blank_name_row_is_invalid() {
        let bad = AccountRow {
            full_name: "  ".to_string(),
            ..row()
        };
        assert!(matches!(
            Account::try_from(bad),
            Err(DatabaseError::InvalidRow(_))
        ));
    }

    #[test]
    fn test_new_account_from_snapshot() {
        let account = Account::new("Frank").unwrap();
        let new = NewAccount::from(&account);

        assert_eq!(new.full_name, "Frank");
        assert_eq!(new.balance_usd_cents, 0);
        assert_eq!(new.closed_at_utc, None);
    }
}
