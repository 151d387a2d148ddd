//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger test suite.
//!
//! # Modules
//!
//! - `memory`: In-memory `AccountStore` with serializable semantics and fault injection
//! - `fixtures`: Pre-built test data and a ready-made ledger
//! - `builders`: Builder patterns for account snapshots
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Custom assertion helpers for ledger types
//! - `generators`: Property-based test data generators

pub mod memory;
pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use memory::*;
pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
