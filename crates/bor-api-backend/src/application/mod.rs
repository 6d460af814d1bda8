//! # Application Layer
//!
//! The two backend variants and the handle the RPC layer holds.
//!
//! [`Backend`] pairs the common [`BorApiBackend`] surface with the receipt
//! extension when, and only when, the selected variant has one.

pub mod full_node;
pub mod light_node;

pub use full_node::FullNodeBackend;
pub use light_node::LightNodeBackend;

use crate::config::{BackendConfig, BackendMode, ConfigError};
use crate::ports::{
    BorApiBackend, BorReceiptApi, ConsensusEngine, ReceiptStore, StateSyncEventSource,
    StateSyncSubscription,
};
use shared_types::StateSyncEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Collaborators a backend may be assembled from.
///
/// A light backend only needs `state_sync`.
pub struct BackendParts {
    pub engine: Option<Arc<dyn ConsensusEngine>>,
    pub receipts: Option<Arc<dyn ReceiptStore>>,
    pub state_sync: Arc<dyn StateSyncEventSource>,
}

/// Assembled backend.
#[derive(Clone)]
pub struct Backend {
    api: Arc<dyn BorApiBackend>,
    receipts: Option<Arc<dyn BorReceiptApi>>,
    channel_capacity: usize,
}

impl Backend {
    /// Wrap a full-node backend.
    ///
    /// `channel_capacity` sizes the channels [`Backend::subscribe_state_sync`]
    /// creates and must be non-zero.
    pub fn full(backend: FullNodeBackend, channel_capacity: usize) -> Result<Self, ConfigError> {
        let channel_capacity = checked_capacity(channel_capacity)?;
        let backend = Arc::new(backend);
        Ok(Self {
            api: backend.clone(),
            receipts: Some(backend),
            channel_capacity,
        })
    }

    /// Wrap a light-node backend.
    pub fn light(backend: LightNodeBackend, channel_capacity: usize) -> Result<Self, ConfigError> {
        let channel_capacity = checked_capacity(channel_capacity)?;
        Ok(Self {
            api: Arc::new(backend),
            receipts: None,
            channel_capacity,
        })
    }

    /// Build the variant selected by `config.mode`.
    pub fn from_config(config: &BackendConfig, parts: BackendParts) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.bus.channel_capacity;

        let backend = match config.mode {
            BackendMode::Full => {
                let engine = parts.engine.ok_or(ConfigError::MissingComponent {
                    mode: BackendMode::Full,
                    component: "a consensus engine",
                })?;
                let receipts = parts.receipts.ok_or(ConfigError::MissingComponent {
                    mode: BackendMode::Full,
                    component: "a receipt store",
                })?;
                info!(engine = engine.name(), "Starting full-node Bor backend");
                Self::full(
                    FullNodeBackend::new(engine, receipts, parts.state_sync),
                    capacity,
                )?
            }
            BackendMode::Light => {
                info!("Starting light-node Bor backend");
                Self::light(LightNodeBackend::new(parts.state_sync), capacity)?
            }
        };
        Ok(backend)
    }

    pub fn mode(&self) -> BackendMode {
        self.api.mode()
    }

    /// Common API surface.
    pub fn api(&self) -> &Arc<dyn BorApiBackend> {
        &self.api
    }

    /// Receipt API, full node only.
    pub fn receipts(&self) -> Option<&Arc<dyn BorReceiptApi>> {
        self.receipts.as_ref()
    }

    /// Subscribe through a fresh channel of the configured capacity.
    pub fn subscribe_state_sync(
        &self,
    ) -> (StateSyncSubscription, mpsc::Receiver<StateSyncEvent>) {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        (self.api.subscribe_state_sync_event(tx), rx)
    }
}

fn checked_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::ZeroChannelCapacity);
    }
    Ok(capacity)
}
