//! PostgreSQL account store integration tests
//!
//! These need a Docker daemon for the testcontainers PostgreSQL instance and
//! are ignored by default. Run with `cargo test -p infra_db -- --ignored`.

use std::sync::Arc;

use core_kernel::{AccountId, HealthCheckable, Money, PortError};
use domain_account::{Account, AccountStore, Ledger, LedgerError};
use infra_db::PostgresAccountStore;
use test_utils::{create_isolated_test_database, MoneyFixtures, NameFixtures, TemporalFixtures};

async fn ledger_on_fresh_database() -> (Ledger, PostgresAccountStore, test_utils::TestDatabase) {
    let db = create_isolated_test_database()
        .await
        .expect("failed to start test database");
    let store = PostgresAccountStore::new(db.pool().clone());
    let ledger = Ledger::new(
        Arc::new(store.clone()),
        Arc::new(TemporalFixtures::fixed_clock()),
    );
    (ledger, store, db)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_and_select_round_trip() {
    let (_, store, _db) = ledger_on_fresh_database().await;

    let mut tx = store.begin_serializable().await.unwrap();
    let inserted = tx.insert(&Account::new(NameFixtures::FRANK).unwrap()).await.unwrap();
    let id = inserted.id().unwrap();
    let selected = tx.select_by_id(id).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(selected, Some(inserted));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_rejects_account_with_id() {
    let (_, store, _db) = ledger_on_fresh_database().await;
    let account = Account::rehydrate(Some(AccountId::new(5)), "Frank", Money::ZERO, None).unwrap();

    let mut tx = store.begin_serializable().await.unwrap();
    let err = tx.insert(&account).await.unwrap_err();
    tx.rollback().await.unwrap();

    assert!(matches!(err, PortError::AlreadyPersisted { .. }));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_updates_report_affected_rows() {
    let (_, store, _db) = ledger_on_fresh_database().await;

    let mut tx = store.begin_serializable().await.unwrap();
    let id = tx
        .insert(&Account::new(NameFixtures::FRANK).unwrap())
        .await
        .unwrap()
        .id()
        .unwrap();
    assert_eq!(tx.update_balance(id, Money::from_cents(12_34)).await.unwrap(), 1);
    assert_eq!(
        tx.update_balance(AccountId::new(9_999), Money::ZERO).await.unwrap(),
        0
    );
    tx.update_name(id, NameFixtures::FRANK_RENAMED).await.unwrap();
    tx.update_closed_at(id, TemporalFixtures::now()).await.unwrap();
    let after = tx.select_by_id(id).await.unwrap().unwrap();
    tx.commit().await.unwrap();

    assert_eq!(after.balance(), Money::from_cents(12_34));
    assert_eq!(after.full_name(), NameFixtures::FRANK_RENAMED);
    assert_eq!(after.closed_at(), Some(TemporalFixtures::now()));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_rollback_discards_writes() {
    let (ledger, store, _db) = ledger_on_fresh_database().await;
    let id = ledger.open_account(NameFixtures::FRANK).await.unwrap().id().unwrap();

    let mut tx = store.begin_serializable().await.unwrap();
    tx.update_balance(id, MoneyFixtures::usd_100()).await.unwrap();
    tx.rollback().await.unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(ledger.load(id).await.unwrap().balance(), Money::ZERO);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_ledger_lifecycle() {
    let (ledger, _, _db) = ledger_on_fresh_database().await;

    let opened = ledger.open_account(NameFixtures::FRANK).await.unwrap();
    let id = opened.id().unwrap();
    ledger.deposit(id, MoneyFixtures::usd_100()).await.unwrap();
    ledger.withdraw(id, MoneyFixtures::usd_100()).await.unwrap();
    let closed = ledger.close(id).await.unwrap();

    assert_eq!(closed.closed_at(), Some(TemporalFixtures::now()));
    let err = ledger.deposit(id, MoneyFixtures::one_cent()).await.unwrap_err();
    assert!(matches!(err, LedgerError::AccountClosed(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_overlapping_transactions_fail_serialization() {
    let (ledger, store, _db) = ledger_on_fresh_database().await;
    let id = ledger.open_account(NameFixtures::FRANK).await.unwrap().id().unwrap();
    ledger.deposit(id, MoneyFixtures::one_dollar()).await.unwrap();

    let mut first = store.begin_serializable().await.unwrap();
    let mut second = store.begin_serializable().await.unwrap();
    let a = first.select_by_id(id).await.unwrap().unwrap();
    let b = second.select_by_id(id).await.unwrap().unwrap();
    first
        .update_balance(id, a.balance().checked_sub(&Money::from_cents(99)).unwrap())
        .await
        .unwrap();
    first.commit().await.unwrap();

    let write = second
        .update_balance(id, b.balance().checked_sub(&Money::from_cents(98)).unwrap())
        .await;
    let outcome = match write {
        Ok(_) => second.commit().await,
        Err(e) => Err(e),
    };
    second.rollback().await.unwrap();

    let err = outcome.unwrap_err();
    assert!(err.is_serialization_failure(), "unexpected error: {err}");
    assert_eq!(ledger.load(id).await.unwrap().balance(), Money::from_cents(1));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check() {
    let (_, store, _db) = ledger_on_fresh_database().await;

    assert!(store.health_check().await.is_healthy());
}
