//! # Adapters
//!
//! Outbound port implementations: chain database stores, the receipt
//! accessor built on them, and the state-sync feed bridge.

pub mod memory_store;
pub mod receipt_store;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;
pub mod state_sync_feed;

pub use memory_store::InMemoryKVStore;
pub use receipt_store::KvReceiptStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::RocksDbStore;
pub use state_sync_feed::StateSyncFeedAdapter;
