//! # Query Context
//!
//! Per-request context handed to every retrieval operation.
//!
//! Cancellation is cooperative and coarse: a caller may check
//! [`QueryContext::is_cancelled`] before issuing a read, but a read that has
//! already started always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Request-scoped context.
///
/// Cloning is cheap; clones share the cancellation flag.
#[derive(Debug, Clone)]
pub struct QueryContext {
    correlation_id: Uuid,
    cancelled: Arc<AtomicBool>,
}

impl QueryContext {
    /// Create a fresh context with a random correlation id.
    pub fn new() -> Self {
        Self::with_correlation_id(Uuid::new_v4())
    }

    /// Create a context for a known correlation id (e.g. propagated from RPC).
    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Correlation id for log lines.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Mark the request as cancelled. Visible to every clone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}
