//! Core Kernel - Foundational types for the bank ledger
//!
//! This crate provides the fundamental building blocks used across the domain
//! and infrastructure crates:
//! - Money with exact, range-checked integer-cent arithmetic
//! - Account identifiers
//! - The injectable clock
//! - Port error and health-check types shared by every adapter

pub mod money;
pub mod identifiers;
pub mod clock;
pub mod ports;

pub use money::{Money, MoneyError};
pub use identifiers::AccountId;
pub use clock::{Clock, SystemClock, FixedClock};
pub use ports::{PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable};
