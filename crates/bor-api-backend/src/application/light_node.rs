//! # Light-Node Backend
//!
//! A light node has no consensus engine and no receipt database. It can only
//! relay state-sync events from the light chain's feed; root hashes are
//! structurally unavailable and receipts are not part of its API at all.

use crate::config::BackendMode;
use crate::domain::BackendError;
use crate::ports::{BorApiBackend, StateSyncEventSource, StateSyncSubscription};
use shared_types::{QueryContext, StateSyncEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Light-node backend.
pub struct LightNodeBackend {
    state_sync: Arc<dyn StateSyncEventSource>,
}

impl LightNodeBackend {
    pub fn new(state_sync: Arc<dyn StateSyncEventSource>) -> Self {
        Self { state_sync }
    }
}

impl BorApiBackend for LightNodeBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Light
    }

    fn get_root_hash(
        &self,
        ctx: &QueryContext,
        start_block: u64,
        end_block: u64,
    ) -> Result<String, BackendError> {
        debug!(
            correlation_id = %ctx.correlation_id(),
            start_block,
            end_block,
            "Root hash requested from light node"
        );
        Err(BackendError::NotImplemented {
            operation: "get_root_hash",
        })
    }

    fn subscribe_state_sync_event(
        &self,
        sink: mpsc::Sender<StateSyncEvent>,
    ) -> StateSyncSubscription {
        self.state_sync.subscribe_state_sync_event(sink)
    }
}
