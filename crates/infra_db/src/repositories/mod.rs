//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL statements and map between database rows
//! and domain types. They never open or finish transactions themselves.

pub mod account;

pub use account::{AccountRepository, AccountRow, NewAccount};
