//! # Bor API Backend
//!
//! Chain-data access for the Bor side chain: checkpoint root hashes,
//! state-sync receipts, logs and transactions, and the live state-sync
//! event feed.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Backends
//!
//! | Operation | Full node | Light node |
//! |-----------|-----------|------------|
//! | `get_root_hash` | engine's `bor` module, or `EngineUnavailable` | `NotImplemented` |
//! | `get_bor_block_receipt` | receipt or `NotFound` | not offered |
//! | `get_bor_block_logs` | logs, empty when absent | not offered |
//! | `get_bor_block_transaction` | lookup, zero-valued when absent | not offered |
//! | `subscribe_state_sync_event` | chain feed | light chain feed |
//!
//! The receipt operations live on [`BorReceiptApi`], which only
//! [`FullNodeBackend`] implements.
//!
//! ## Module Structure
//!
//! ```text
//! bor-api-backend/
//! ├── domain/          # Capability registry, errors, log filter
//! ├── ports/           # BorApiBackend/BorReceiptApi (inbound), engine/store/feed (outbound)
//! ├── adapters/        # KV stores, receipt accessor, state-sync feed bridge
//! ├── application/     # FullNodeBackend, LightNodeBackend, Backend handle
//! ├── rpc/             # JSON-RPC dispatch for bor_* / eth_getBorBlock*
//! └── config.rs        # BackendConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod rpc;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports
pub use adapters::{InMemoryKVStore, KvReceiptStore, StateSyncFeedAdapter};
#[cfg(feature = "rocksdb")]
pub use adapters::RocksDbStore;
pub use application::{Backend, BackendParts, FullNodeBackend, LightNodeBackend};
pub use config::{BackendConfig, BackendMode, BusConfig, ConfigError, StorageConfig};
pub use domain::{
    BackendError, CapabilityError, CapabilityRecord, CapabilityRegistry, LogFilter,
    RootHashError, RootHashProvider, BOR_NAMESPACE,
};
pub use ports::{
    BorApiBackend, BorReceiptApi, ConsensusEngine, KeyValueStore, ReceiptStore,
    StateSyncEventSource, StateSyncSubscription,
};
pub use rpc::{ApiError, ApiResult, RpcDispatcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
