//! Bor receipt methods in the eth namespace (eth_getBorBlock*).

use super::error::ApiResult;
use super::types::{RpcLog, RpcReceipt, RpcTransaction};
use crate::domain::LogFilter;
use crate::ports::BorReceiptApi;
use primitive_types::H256;
use shared_types::QueryContext;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Receipt method handler. Only exists for backends with the chain database.
pub struct BorChainRpc {
    backend: Arc<dyn BorReceiptApi>,
}

impl BorChainRpc {
    pub fn new(backend: Arc<dyn BorReceiptApi>) -> Self {
        Self { backend }
    }

    /// eth_getBorBlockReceipt - bor receipt of a block
    #[instrument(skip(self, ctx))]
    pub fn get_bor_block_receipt(
        &self,
        ctx: &QueryContext,
        block_hash: H256,
    ) -> ApiResult<RpcReceipt> {
        let receipt = self.backend.get_bor_block_receipt(ctx, block_hash.0)?;
        Ok(receipt.into())
    }

    /// eth_getBorBlockLogs - logs of a block's bor receipt, optionally filtered
    #[instrument(skip(self, ctx, filter))]
    pub fn get_bor_block_logs(
        &self,
        ctx: &QueryContext,
        block_hash: H256,
        filter: Option<LogFilter>,
    ) -> ApiResult<Vec<RpcLog>> {
        let logs = self.backend.get_bor_block_logs(ctx, block_hash.0)?;
        let total = logs.len();
        let logs = match filter {
            Some(filter) => filter.apply(logs),
            None => logs,
        };
        debug!(total, returned = logs.len(), "Bor logs served");
        Ok(logs.into_iter().map(RpcLog::from).collect())
    }

    /// eth_getBorBlockTransaction - state-sync transaction by hash, or null
    #[instrument(skip(self, ctx))]
    pub fn get_bor_block_transaction(
        &self,
        ctx: &QueryContext,
        tx_hash: H256,
    ) -> ApiResult<Option<RpcTransaction>> {
        let lookup = self.backend.get_bor_block_transaction(ctx, tx_hash.0)?;
        Ok(RpcTransaction::from_lookup(lookup))
    }
}
