//! # Domain Errors
//!
//! Error taxonomy surfaced by the backend to its callers.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | `EngineUnavailable` | full node | no engine module implements root hashes |
//! | `NotImplemented` | light node | operation structurally unsupported |
//! | `NotFound` | receipt lookup | entity absent from storage |
//! | `Upstream` | full node | engine error, passed through unchanged |

use super::capability::RootHashError;
use shared_types::{hash_to_hex, Hash};
use thiserror::Error;

/// Backend error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No consensus module implements the root-hash capability.
    #[error("Only available in Bor engine")]
    EngineUnavailable,

    /// The backend variant cannot serve this operation at all.
    #[error("Not implemented: {operation}")]
    NotImplemented {
        /// Operation that was requested.
        operation: &'static str,
    },

    /// Queried entity is absent from storage.
    #[error("{what} not found: {}", hash_to_hex(.hash))]
    NotFound {
        /// Kind of entity looked up.
        what: &'static str,
        /// Key that was looked up.
        hash: Hash,
    },

    /// Error raised by the engine's root-hash service.
    #[error(transparent)]
    Upstream(#[from] RootHashError),
}

impl BackendError {
    /// Structural failures never succeed on retry.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::NotImplemented { .. } | Self::EngineUnavailable)
    }

    pub(crate) fn receipt_not_found(block_hash: Hash) -> Self {
        Self::NotFound {
            what: "bor receipt",
            hash: block_hash,
        }
    }
}
