//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the account ledger,
//! using SQLx.
//!
//! # Architecture
//!
//! - `repositories`: statement-level access to the `account` table
//! - `adapters`: `AccountStore` / `AccountTransaction` port implementations
//!   that run every ledger operation in a SERIALIZABLE transaction
//! - `pool`: connection pool configuration and schema migrations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresAccountStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ledger")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresAccountStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresAccountStore, PostgresAccountTransaction};
