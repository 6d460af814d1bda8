//! # Inbound Ports
//!
//! The capability contract the RPC layer calls into.
//!
//! Every backend implements [`BorApiBackend`]. Only a backend with full
//! access to the chain database also implements [`BorReceiptApi`]; a light
//! node cannot, and the type system keeps it that way.

use super::outbound::StateSyncSubscription;
use crate::config::BackendMode;
use crate::domain::BackendError;
use shared_types::{
    BorTransactionLookup, Hash, QueryContext, SideChainLog, SideChainReceipt, StateSyncEvent,
};
use tokio::sync::mpsc;

/// Bor API backend - inbound port shared by full and light nodes.
///
/// All retrieval methods are synchronous reads. `ctx` is accepted for
/// correlation but never interrupts a read in progress.
pub trait BorApiBackend: Send + Sync {
    /// Which variant this backend is.
    fn mode(&self) -> BackendMode;

    /// Root hash over `start_block..=end_block` for checkpoint submission.
    fn get_root_hash(
        &self,
        ctx: &QueryContext,
        start_block: u64,
        end_block: u64,
    ) -> Result<String, BackendError>;

    /// Register `sink` for state-sync events.
    fn subscribe_state_sync_event(
        &self,
        sink: mpsc::Sender<StateSyncEvent>,
    ) -> StateSyncSubscription;
}

/// Side-chain receipt access - only backends with the chain database.
pub trait BorReceiptApi: BorApiBackend {
    /// Bor receipt of a block. Absence is `BackendError::NotFound`.
    fn get_bor_block_receipt(
        &self,
        ctx: &QueryContext,
        block_hash: Hash,
    ) -> Result<SideChainReceipt, BackendError>;

    /// Logs of a block's bor receipt, in stored order. Absence is an empty vec.
    fn get_bor_block_logs(
        &self,
        ctx: &QueryContext,
        block_hash: Hash,
    ) -> Result<Vec<SideChainLog>, BackendError>;

    /// State-sync transaction by hash. Absence is the default lookup; the
    /// error slot is reserved and currently never used.
    fn get_bor_block_transaction(
        &self,
        ctx: &QueryContext,
        tx_hash: Hash,
    ) -> Result<BorTransactionLookup, BackendError>;
}
