//! # Event Publisher
//!
//! The in-memory `Feed<T>` and its publishing side.

use crate::subscriber::{Subscription, SubscriptionId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// A registered subscriber channel.
struct Sink<T> {
    id: SubscriptionId,
    sender: mpsc::Sender<T>,
}

/// State shared between a feed and the subscriptions it handed out.
pub(crate) struct FeedInner<T> {
    /// Live subscriber channels, in subscription order.
    sinks: Mutex<Vec<Sink<T>>>,
    /// Id source for new subscriptions.
    next_id: AtomicU64,
    /// Total events published.
    events_sent: AtomicU64,
    /// Per-subscriber deliveries dropped because the channel was full.
    dropped: AtomicU64,
}

impl<T> FeedInner<T> {
    /// Remove a sink. Holding the sink lock here orders the removal against
    /// any in-progress `send`.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut sinks = self.sinks.lock();
        let before = sinks.len();
        sinks.retain(|sink| sink.id != id);
        before != sinks.len()
    }
}

/// In-memory one-to-many event feed.
///
/// Cloning a `Feed` yields another handle onto the same subscriber set.
pub struct Feed<T> {
    inner: Arc<FeedInner<T>>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Feed<T> {
    /// Create a feed with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                sinks: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                events_sent: AtomicU64::new(0),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Register the write end of a channel.
    ///
    /// Events published after this call returns are delivered to `sink`
    /// until the returned subscription is unsubscribed or dropped.
    pub fn subscribe(&self, sink: mpsc::Sender<T>) -> Subscription<T> {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.sinks.lock().push(Sink { id, sender: sink });

        debug!(subscription = %id, "New feed subscription");

        Subscription::new(id, Arc::downgrade(&self.inner))
    }

    /// Deliver `value` to every subscriber and return how many received it.
    ///
    /// Never blocks: a full channel loses this event, a closed channel is
    /// unregistered.
    pub fn send(&self, value: T) -> usize {
        self.inner.events_sent.fetch_add(1, Ordering::Relaxed);

        let mut sinks = self.inner.sinks.lock();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for sink in sinks.iter() {
            match sink.sender.try_send(value.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    self.inner.dropped.fetch_add(1, Ordering::Relaxed);
                    warn!(subscription = %sink.id, "Subscriber channel full, event dropped");
                }
                Err(TrySendError::Closed(_)) => closed.push(sink.id),
            }
        }

        if !closed.is_empty() {
            sinks.retain(|sink| !closed.contains(&sink.id));
            debug!(removed = closed.len(), "Pruned closed subscriber channels");
        }

        delivered
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.sinks.lock().len()
    }

    /// Total events passed to `send`.
    #[must_use]
    pub fn events_sent(&self) -> u64 {
        self.inner.events_sent.load(Ordering::Relaxed)
    }

    /// Deliveries lost to full subscriber channels.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }
}

impl<T: Clone + Send + 'static> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}
