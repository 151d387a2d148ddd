//! Domain Adapters
//!
//! Adapter implementations for domain ports, connecting domain interfaces
//! to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresAccountStore;
//! use domain_account::AccountStore;
//!
//! let store = PostgresAccountStore::new(pool);
//! let mut tx = store.begin_serializable().await?;
//! ```

pub mod account;

pub use account::{PostgresAccountStore, PostgresAccountTransaction};
