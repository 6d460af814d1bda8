//! Bor namespace methods (bor_*).

use super::error::ApiResult;
use crate::ports::BorApiBackend;
use shared_types::QueryContext;
use std::sync::Arc;
use tracing::{debug, instrument};

/// `bor` namespace handler. Served by both backend variants.
pub struct BorRpc {
    backend: Arc<dyn BorApiBackend>,
}

impl BorRpc {
    pub fn new(backend: Arc<dyn BorApiBackend>) -> Self {
        Self { backend }
    }

    /// bor_getRootHash - checkpoint root hash over `start..=end`
    #[instrument(skip(self, ctx))]
    pub fn get_root_hash(&self, ctx: &QueryContext, start: u64, end: u64) -> ApiResult<String> {
        let root = self.backend.get_root_hash(ctx, start, end)?;
        debug!(%root, "Root hash served");
        Ok(root)
    }
}
