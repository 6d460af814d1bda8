//! Test fixtures: mock engines, root-hash providers and a writer that lays
//! bor records out in the chain database schema.

use crate::adapters::receipt_store::{
    bor_receipt_key, bor_tx_body_key, bor_tx_lookup_key, canonical_hash_key, derive_bor_tx_hash,
    header_number_key,
};
use crate::adapters::InMemoryKVStore;
use crate::domain::{CapabilityRegistry, RootHashError, RootHashProvider};
use crate::ports::ConsensusEngine;
use parking_lot::Mutex;
use shared_types::{BlockRange, Hash, SideChainLog, SideChainReceipt, SideChainTransaction};
use std::sync::Arc;

/// System address state-sync transactions are attributed to.
pub const SYSTEM_ADDRESS: [u8; 20] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe,
];

/// Root-hash provider returning a fixed hash and recording calls.
#[derive(Default)]
pub struct MockRootHashProvider {
    root: String,
    calls: Mutex<Vec<BlockRange>>,
}

impl MockRootHashProvider {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Ranges requested so far.
    pub fn calls(&self) -> Vec<BlockRange> {
        self.calls.lock().clone()
    }
}

impl RootHashProvider for MockRootHashProvider {
    fn get_root_hash(&self, range: BlockRange) -> Result<String, RootHashError> {
        self.calls.lock().push(range);
        Ok(self.root.clone())
    }
}

/// Root-hash provider that always fails with the given error.
pub struct FailingRootHashProvider {
    error: RootHashError,
}

impl FailingRootHashProvider {
    pub fn new(error: RootHashError) -> Self {
        Self { error }
    }
}

impl RootHashProvider for FailingRootHashProvider {
    fn get_root_hash(&self, _range: BlockRange) -> Result<String, RootHashError> {
        Err(self.error.clone())
    }
}

/// Engine with a fixed capability registry.
pub struct StaticEngine {
    name: String,
    registry: CapabilityRegistry,
}

impl StaticEngine {
    pub fn new(name: impl Into<String>, registry: CapabilityRegistry) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }
}

impl ConsensusEngine for StaticEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &CapabilityRegistry {
        &self.registry
    }
}

/// Records written for one block.
#[derive(Debug, Clone)]
pub struct WrittenBorBlock {
    pub receipt: SideChainReceipt,
    pub transaction: SideChainTransaction,
}

/// Writes bor receipts and transactions the way the bridge process persists
/// them.
pub struct BorReceiptWriter {
    db: Arc<InMemoryKVStore>,
}

impl BorReceiptWriter {
    pub fn new(db: Arc<InMemoryKVStore>) -> Self {
        Self { db }
    }

    /// Persist the header index, canonical hash, bor receipt and derived
    /// transaction of block `(number, block_hash)`.
    ///
    /// Positional fields of `logs` are overwritten to point at the block.
    pub fn write_bor_block(
        &self,
        number: u64,
        block_hash: Hash,
        logs: Vec<SideChainLog>,
        tx_index: u64,
    ) -> WrittenBorBlock {
        let tx_hash = derive_bor_tx_hash(number, &block_hash);
        let logs = logs
            .into_iter()
            .map(|log| SideChainLog {
                block_number: number,
                block_hash,
                tx_hash,
                tx_index,
                ..log
            })
            .collect();

        let receipt = SideChainReceipt {
            status: SideChainReceipt::STATUS_SUCCESSFUL,
            cumulative_gas_used: 0,
            logs,
            tx_hash,
            block_hash,
            block_number: number,
            transaction_index: tx_index,
        };
        let transaction = SideChainTransaction {
            hash: tx_hash,
            from: SYSTEM_ADDRESS,
            to: Some(SYSTEM_ADDRESS),
            ..Default::default()
        };

        self.db.put(&header_number_key(&block_hash), &number.to_be_bytes());
        self.db.put(&canonical_hash_key(number), &block_hash);
        self.db.put(
            &bor_receipt_key(number, &block_hash),
            &bincode::serialize(&receipt).expect("receipt encodes"),
        );
        self.db
            .put(&bor_tx_lookup_key(&tx_hash), &number.to_be_bytes());
        self.db.put(
            &bor_tx_body_key(&tx_hash),
            &bincode::serialize(&transaction).expect("transaction encodes"),
        );

        WrittenBorBlock {
            receipt,
            transaction,
        }
    }

    /// Block with `count` logs, each emitted by a distinct contract with one
    /// topic, at transaction index 0.
    pub fn write_bor_block_with_logs(
        &self,
        number: u64,
        block_hash: Hash,
        count: u64,
    ) -> WrittenBorBlock {
        let logs = (0..count)
            .map(|i| SideChainLog {
                address: [(i as u8).wrapping_add(1); 20],
                topics: vec![[i as u8; 32]],
                data: i.to_be_bytes().to_vec(),
                log_index: i,
                ..Default::default()
            })
            .collect();
        self.write_bor_block(number, block_hash, logs, 0)
    }
}
