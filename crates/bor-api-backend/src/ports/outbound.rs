//! # Outbound Ports
//!
//! Collaborators the backend reads from: the consensus engine, the chain
//! database and the chain's state-sync feed.

use crate::domain::CapabilityRegistry;
use shared_bus::Subscription;
use shared_types::{BorTransactionLookup, Hash, KVStoreError, SideChainReceipt, StateSyncEvent};
use tokio::sync::mpsc;

/// Subscription handle for state-sync events.
pub type StateSyncSubscription = Subscription<StateSyncEvent>;

/// Running consensus engine - outbound port.
pub trait ConsensusEngine: Send + Sync {
    /// Engine name for logging.
    fn name(&self) -> &str;

    /// API modules the engine exposes. Read-only after construction.
    fn capabilities(&self) -> &CapabilityRegistry;
}

/// Read access to persisted bor receipts and transactions - outbound port.
///
/// Absence is `None`. Implementations never cache and never write.
pub trait ReceiptStore: Send + Sync {
    /// Bor receipt of the block with hash `block_hash`.
    fn receipt_by_hash(&self, block_hash: &Hash) -> Option<SideChainReceipt>;

    /// State-sync transaction with its position, by transaction hash.
    fn transaction_by_hash(&self, tx_hash: &Hash) -> Option<BorTransactionLookup>;
}

/// The chain component's state-sync feed - outbound port.
pub trait StateSyncEventSource: Send + Sync {
    /// Forward `sink` to the underlying feed.
    fn subscribe_state_sync_event(
        &self,
        sink: mpsc::Sender<StateSyncEvent>,
    ) -> StateSyncSubscription;
}

/// Abstract read interface over the chain key-value database.
///
/// Production: `RocksDbStore` (feature `rocksdb`)
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}
