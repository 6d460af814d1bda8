//! # Shared Types Crate
//!
//! Side-chain entities produced by the state-sync bridge and read back by the
//! API backend.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: receipts, logs, transactions and state-sync
//!   events are defined once, here.
//! - **Read-Only Consumers**: nothing in this crate writes to storage; the
//!   types are plain data owned by whoever persisted them.
//! - **Zero Means Absent**: lookups that report absence through default values
//!   (`BorTransactionLookup`) use `Default` rather than a sentinel error.

pub mod context;
pub mod entities;
pub mod errors;

pub use context::QueryContext;
pub use entities::*;
pub use errors::*;
