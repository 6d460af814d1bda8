//! # Error Types
//!
//! Storage errors shared by the key-value port and its adapters.

use thiserror::Error;

/// Errors raised by a key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// Underlying storage I/O failed.
    #[error("I/O error: {message}")]
    IOError { message: String },

    /// The store was opened read-only and a write was attempted.
    #[error("Store is read-only")]
    ReadOnly,
}

/// Errors raised while decoding a persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Record bytes did not decode.
    #[error("Corrupt {kind} record: {message}")]
    Corrupt { kind: &'static str, message: String },

    /// A fixed-width field had the wrong length.
    #[error("Invalid {kind} length: expected {expected}, got {got}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    /// Reading the record failed at the store level.
    #[error(transparent)]
    Store(#[from] KVStoreError),
}
