//! # Capability Registry
//!
//! API modules a consensus engine exposes, keyed by namespace.
//!
//! The engine fills the registry once, at construction. A namespace can be
//! registered only once: a second registration is rejected, so lookups never
//! have to pick between competing providers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = CapabilityRegistry::new();
//! registry.register(BOR_NAMESPACE, "1.0", Arc::new(bor_api))?;
//!
//! let provider = registry.root_hash_provider().ok_or(BackendError::EngineUnavailable)?;
//! let root = provider.get_root_hash(BlockRange::new(1, 256))?;
//! ```

use shared_types::BlockRange;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Namespace under which the checkpointing engine exposes root hashes.
pub const BOR_NAMESPACE: &str = "bor";

/// Errors raised by a root-hash service.
///
/// Defined by the engine; the backend forwards them without rewording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootHashError {
    /// `start` is greater than `end`.
    #[error("Invalid block range: start {start} > end {end}")]
    InvalidRange { start: u64, end: u64 },

    /// Range exceeds the engine's checkpoint length limit.
    #[error("Block range too long: {len} > {max}")]
    RangeTooLong { len: u64, max: u64 },

    /// A header in the range is not available locally.
    #[error("Header {0} not available")]
    HeaderUnavailable(u64),

    /// Any other engine failure.
    #[error("{0}")]
    Engine(String),
}

/// Root-hash computation over a block range.
pub trait RootHashProvider: Send + Sync {
    /// Compute the checkpoint root hash over `range`, inclusive.
    ///
    /// The range arrives unvalidated.
    fn get_root_hash(&self, range: BlockRange) -> Result<String, RootHashError>;
}

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The namespace already has a registered module.
    #[error("Namespace already registered: {namespace}")]
    DuplicateNamespace { namespace: String },

    /// Namespaces must be non-empty.
    #[error("Empty namespace")]
    EmptyNamespace,
}

/// One registered API module.
#[derive(Clone)]
pub struct CapabilityRecord {
    /// Namespace the module is exposed under.
    pub namespace: String,
    /// Module version string.
    pub version: String,
    /// The service implementing the capability.
    pub service: Arc<dyn RootHashProvider>,
}

impl fmt::Debug for CapabilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRecord")
            .field("namespace", &self.namespace)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Typed registry of engine API modules, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    records: Vec<CapabilityRecord>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module.
    ///
    /// Rejects a namespace that is already present; the first registrant
    /// keeps the slot.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        version: impl Into<String>,
        service: Arc<dyn RootHashProvider>,
    ) -> Result<(), CapabilityError> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(CapabilityError::EmptyNamespace);
        }
        if self.find(&namespace).is_some() {
            warn!(namespace = %namespace, "Rejected duplicate capability registration");
            return Err(CapabilityError::DuplicateNamespace { namespace });
        }

        let version = version.into();
        debug!(namespace = %namespace, version = %version, "Registered capability");
        self.records.push(CapabilityRecord {
            namespace,
            version,
            service,
        });
        Ok(())
    }

    /// All modules, in registration order.
    pub fn modules(&self) -> &[CapabilityRecord] {
        &self.records
    }

    /// Registered namespaces, in registration order.
    pub fn namespaces(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.namespace.as_str()).collect()
    }

    /// First (and only) module registered under `namespace`.
    pub fn find(&self, namespace: &str) -> Option<&CapabilityRecord> {
        self.records.iter().find(|r| r.namespace == namespace)
    }

    /// The root-hash service, if the engine exposes one under [`BOR_NAMESPACE`].
    pub fn root_hash_provider(&self) -> Option<Arc<dyn RootHashProvider>> {
        self.find(BOR_NAMESPACE).map(|r| r.service.clone())
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
