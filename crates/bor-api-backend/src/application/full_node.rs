//! # Full-Node Backend
//!
//! Serves every Bor query from the local consensus engine and chain
//! database.

use crate::config::BackendMode;
use crate::domain::BackendError;
use crate::ports::{
    BorApiBackend, BorReceiptApi, ConsensusEngine, ReceiptStore, StateSyncEventSource,
    StateSyncSubscription,
};
use shared_types::{
    short_hex, BlockRange, BorTransactionLookup, Hash, QueryContext, SideChainLog, SideChainReceipt,
    StateSyncEvent,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Full-node backend.
pub struct FullNodeBackend {
    engine: Arc<dyn ConsensusEngine>,
    receipts: Arc<dyn ReceiptStore>,
    state_sync: Arc<dyn StateSyncEventSource>,
}

impl FullNodeBackend {
    pub fn new(
        engine: Arc<dyn ConsensusEngine>,
        receipts: Arc<dyn ReceiptStore>,
        state_sync: Arc<dyn StateSyncEventSource>,
    ) -> Self {
        Self {
            engine,
            receipts,
            state_sync,
        }
    }
}

impl BorApiBackend for FullNodeBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Full
    }

    fn get_root_hash(
        &self,
        ctx: &QueryContext,
        start_block: u64,
        end_block: u64,
    ) -> Result<String, BackendError> {
        let Some(provider) = self.engine.capabilities().root_hash_provider() else {
            warn!(
                engine = self.engine.name(),
                namespaces = ?self.engine.capabilities().namespaces(),
                "Engine exposes no root hash service"
            );
            return Err(BackendError::EngineUnavailable);
        };

        debug!(
            correlation_id = %ctx.correlation_id(),
            start_block,
            end_block,
            "Computing root hash"
        );
        Ok(provider.get_root_hash(BlockRange::new(start_block, end_block))?)
    }

    fn subscribe_state_sync_event(
        &self,
        sink: mpsc::Sender<StateSyncEvent>,
    ) -> StateSyncSubscription {
        self.state_sync.subscribe_state_sync_event(sink)
    }
}

impl BorReceiptApi for FullNodeBackend {
    fn get_bor_block_receipt(
        &self,
        ctx: &QueryContext,
        block_hash: Hash,
    ) -> Result<SideChainReceipt, BackendError> {
        debug!(
            correlation_id = %ctx.correlation_id(),
            block = %short_hex(&block_hash),
            "Bor receipt query"
        );
        self.receipts
            .receipt_by_hash(&block_hash)
            .ok_or_else(|| BackendError::receipt_not_found(block_hash))
    }

    fn get_bor_block_logs(
        &self,
        ctx: &QueryContext,
        block_hash: Hash,
    ) -> Result<Vec<SideChainLog>, BackendError> {
        debug!(
            correlation_id = %ctx.correlation_id(),
            block = %short_hex(&block_hash),
            "Bor logs query"
        );
        Ok(self
            .receipts
            .receipt_by_hash(&block_hash)
            .map(|receipt| receipt.logs)
            .unwrap_or_default())
    }

    fn get_bor_block_transaction(
        &self,
        ctx: &QueryContext,
        tx_hash: Hash,
    ) -> Result<BorTransactionLookup, BackendError> {
        debug!(
            correlation_id = %ctx.correlation_id(),
            tx = %short_hex(&tx_hash),
            "Bor transaction query"
        );
        Ok(self
            .receipts
            .transaction_by_hash(&tx_hash)
            .unwrap_or_default())
    }
}
